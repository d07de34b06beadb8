//! Server configuration from command-line flags and environment.

use clap::Parser;
use std::net::SocketAddr;
use todo_core::DEFAULT_TITLE;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-server")]
#[command(about = "Content repository serving the server-rendered todo example")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "TODO_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// Repository path of the demo list
    #[arg(long, env = "TODO_RESOURCE_PATH", default_value = "/content/todo")]
    pub resource_path: String,

    /// Title stored on the demo list
    #[arg(long, env = "TODO_TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Seed the demo list with the three placeholder items
    #[arg(long)]
    pub seed_placeholders: bool,
}
