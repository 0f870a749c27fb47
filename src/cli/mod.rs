//! Command-line interface definition

use clap::{Parser, Subcommand};

/// netkit - resource management and network diagnostics
#[derive(Parser, Debug, Clone)]
#[command(name = "netkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List all resources
    List,

    /// Create a new resource
    Create {
        /// Resource name
        #[arg(short, long)]
        name: String,

        /// Resource DNS
        #[arg(short, long)]
        dns: String,
    },

    /// Update an existing resource
    Update {
        /// Resource ID
        #[arg(short, long)]
        id: u32,

        /// New resource name
        #[arg(short, long)]
        name: Option<String>,

        /// New resource DNS
        #[arg(short, long)]
        dns: Option<String>,
    },

    /// Delete a resource by ID
    Delete {
        /// Resource ID
        #[arg(short, long)]
        id: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Perform network diagnostics against a domain
    Debug {
        /// Domain to diagnose
        #[arg(short, long)]
        domain: String,
    },
}
