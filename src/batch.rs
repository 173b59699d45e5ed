//! Decoding many independent members at once.
//!
//! Every decode is self-contained, so members can be spread over threads
//! freely. With the `parallel` feature the work runs on the rayon pool;
//! without it the same API decodes sequentially.

use crate::decompress::{DecodeOptions, Method, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One member to decode.
#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    pub method: Method,
    pub input: &'a [u8],
    pub unpacked_size: usize,
}

impl<'a> Job<'a> {
    pub fn new(method: Method, input: &'a [u8], unpacked_size: usize) -> Self {
        Self {
            method,
            input,
            unpacked_size,
        }
    }

    fn run(&self, options: DecodeOptions) -> Result<Vec<u8>> {
        self.method
            .decompress(self.input, self.unpacked_size, options)
    }
}

/// Decode every job. Results are returned in job order.
pub fn decompress_all(jobs: &[Job<'_>], options: DecodeOptions) -> Vec<Result<Vec<u8>>> {
    #[cfg(feature = "parallel")]
    let jobs = jobs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let jobs = jobs.iter();

    jobs.map(|job| job.run(options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompress::{Corruption, DecompressError};

    #[test]
    fn test_results_keep_job_order() {
        let bopa = [0xC0, b'A', b'B', 0x04, 0x02];
        let rle = [0x7F, 3, b'z'];
        let corrupt = [0x00, 0x00, 0x00];

        let jobs = [
            Job::new(Method::Bopa, &bopa, 9),
            Job::new(Method::Rle, &rle, 3),
            Job::new(Method::Bopa, &corrupt, 3),
            Job::new(Method::Pp20, &[], 0),
        ];
        let results = decompress_all(&jobs, DecodeOptions::default());

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_deref(), Ok(&b"ABABABABA"[..]));
        assert_eq!(results[1].as_deref(), Ok(&b"zzz"[..]));
        assert_eq!(
            results[2],
            Err(DecompressError::CorruptStream(Corruption::ZeroOffset {
                position: 0
            }))
        );
        assert_eq!(results[3].as_deref(), Ok(&[][..]));
    }

    #[test]
    fn test_many_jobs() {
        let inputs: Vec<Vec<u8>> = (0..64u8).map(|i| vec![0x7F, i, i]).collect();
        let jobs: Vec<Job<'_>> = inputs
            .iter()
            .enumerate()
            .map(|(i, input)| Job::new(Method::Rle, input, i))
            .collect();

        for (i, result) in decompress_all(&jobs, DecodeOptions::default())
            .into_iter()
            .enumerate()
        {
            assert_eq!(result.unwrap(), vec![i as u8; i]);
        }
    }
}
