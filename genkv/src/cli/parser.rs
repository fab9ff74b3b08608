use crate::kv::generation_cache::{DEFAULT_CACHE_SIZE, MAX_CACHE_SIZE};
use clap::{Parser, ValueEnum};
use std::{net::IpAddr, ops::RangeInclusive, time::Duration};

const DEFAULT_PORT: u16 = 7878;
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const CONNECTION_LIMIT: u32 = 1024;
const LISTEN_BACKLOG: u32 = 1024;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuntimeType {
    CurrentThread,
    MultiThread,
}

impl RuntimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeType::CurrentThread => "Work handled within current thread runtime",
            RuntimeType::MultiThread => "Work stealing threadpool runtime",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
/// genkvd - generation-versioned key value server
pub struct GenkvdConfig {
    #[arg(short, long, value_name = "PORT", value_parser = port_in_range, default_value_t = DEFAULT_PORT)]
    /// TCP port to listen on
    pub port: u16,

    #[arg(short = 'l', long = "listen", value_name = "ADDRESS", default_value_t = DEFAULT_ADDRESS.parse::<IpAddr>().unwrap())]
    /// interface to listen on
    pub listen_address: IpAddr,

    #[arg(short, long, value_name = "CONNECTION-LIMIT", default_value_t = CONNECTION_LIMIT)]
    /// max simultaneous connections
    pub connection_limit: u32,

    #[arg(short = 'b', long, value_name = "LISTEN-BACKLOG", default_value_t = LISTEN_BACKLOG)]
    /// set the backlog queue limit
    pub listen_backlog: u32,

    #[arg(long, value_name = "BUCKETS", value_parser = cache_size_in_range, default_value_t = DEFAULT_CACHE_SIZE)]
    /// number of generation cache buckets (1-65536)
    pub cache_size: usize,

    #[arg(long, value_name = "STRIPES", default_value_t = 0)]
    /// number of cache lock stripes, 0 derives it from available parallelism
    pub lock_stripes: usize,

    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    /// idle connection timeout in seconds, 0 disables it
    pub timeout: u64,

    #[arg(long, value_name = "BYTES", default_value_t = 0)]
    /// longest accepted request line in bytes, 0 means unlimited
    pub max_line_length: usize,

    #[arg(short, long, value_name = "THREADS", default_value_t = num_cpus::get())]
    /// number of threads to use
    pub threads: usize,

    #[arg(short, long, value_enum, default_value_t = RuntimeType::CurrentThread)]
    /// runtime type to use
    pub runtime_type: RuntimeType,

    #[arg(short, long, action = clap::ArgAction::Count)]
    /// sets the level of verbosity
    pub verbose: u8,
}

impl GenkvdConfig {
    pub fn rx_timeout(&self) -> Option<Duration> {
        match self.timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn max_line_length(&self) -> Option<usize> {
        match self.max_line_length {
            0 => None,
            length => Some(length),
        }
    }

    fn from_args(args: Vec<String>) -> Result<GenkvdConfig, String> {
        let genkvd_args = GenkvdConfig::parse_from(args.iter());
        if genkvd_args.threads == 0 {
            return Err(String::from("number of threads must be greater than 0"));
        }
        Ok(genkvd_args)
    }
}

const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a port number"))?;
    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

fn cache_size_in_range(s: &str) -> Result<usize, String> {
    let size: usize = s
        .parse()
        .map_err(|_| format!("`{s}` isn't a number"))?;
    if (1..=MAX_CACHE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("cache size not in range 1-{}", MAX_CACHE_SIZE))
    }
}

pub fn parse(args: Vec<String>) -> Result<GenkvdConfig, String> {
    GenkvdConfig::from_args(args)
}
