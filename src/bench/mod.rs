// Benchmark Module
// Times key generation, encryption and decryption across key sizes

pub mod runner;

pub use runner::{bench_key_size, run, BenchArgs, BenchRow};
