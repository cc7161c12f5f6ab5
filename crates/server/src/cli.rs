use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "workouts server")]
pub struct Cli {
    #[clap(long, env, default_value = "workouts.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Requests taking longer than this are answered with 408
    #[arg(long, env, default_value = "30")]
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes
    #[arg(long, env, default_value = "1048576")]
    pub request_body_limit: usize,
}
