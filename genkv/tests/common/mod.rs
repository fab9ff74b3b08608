#![allow(dead_code)]
pub mod client;
pub mod random_port;

use genkv::cli::parser::RuntimeType;

pub struct GenkvdServerParamsBuilder {
    runtime: RuntimeType,
    cache_size: usize,
    lock_stripes: usize,
    timeout_secs: u64,
    max_line_length: usize,
    port: u16,
}

impl GenkvdServerParamsBuilder {
    pub fn new() -> GenkvdServerParamsBuilder {
        GenkvdServerParamsBuilder {
            runtime: RuntimeType::CurrentThread,
            cache_size: 3000,
            lock_stripes: 0,
            timeout_secs: 60,
            max_line_length: 0,
            port: 7878,
        }
    }

    pub fn with_runtime(&mut self, runtime: RuntimeType) -> &mut Self {
        self.runtime = runtime;
        self
    }

    pub fn with_cache_size(&mut self, cache_size: usize) -> &mut Self {
        self.cache_size = cache_size;
        self
    }

    pub fn with_lock_stripes(&mut self, lock_stripes: usize) -> &mut Self {
        self.lock_stripes = lock_stripes;
        self
    }

    pub fn with_timeout(&mut self, timeout_secs: u64) -> &mut Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_max_line_length(&mut self, max_line_length: usize) -> &mut Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn with_port(&mut self, port: u16) -> &mut Self {
        self.port = port;
        self
    }

    pub fn build(&self) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        result.push(String::from("./target/debug/genkvd"));
        match self.runtime {
            RuntimeType::CurrentThread => {
                result.push(String::from("--runtime-type"));
                result.push(String::from("current-thread"));
            }
            RuntimeType::MultiThread => {
                result.push(String::from("--runtime-type"));
                result.push(String::from("multi-thread"));
                result.push(String::from("--threads"));
                result.push(String::from("4"));
            }
        }

        result.push(String::from("--cache-size"));
        result.push(self.cache_size.to_string());

        result.push(String::from("--lock-stripes"));
        result.push(self.lock_stripes.to_string());

        result.push(String::from("--timeout"));
        result.push(self.timeout_secs.to_string());

        result.push(String::from("--max-line-length"));
        result.push(self.max_line_length.to_string());

        result.push(String::from("--port"));
        result.push(self.port.to_string());

        result
    }
}

impl Default for GenkvdServerParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
