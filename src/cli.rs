use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Default)]
#[command(name = "authrelay")]
#[command(about = "Authenticated API client with transparent token refresh", long_about = None)]
pub struct Args {
    #[arg(long = "base-url", global = true, help = "API base URL (e.g., https://api.example.com)")]
    pub base_url: Option<String>,

    #[arg(
        long = "download-dir",
        global = true,
        help = "Directory where downloaded files are saved"
    )]
    pub download_dir: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Log request and refresh activity")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and store the returned credentials
    Login {
        #[arg(short = 'u', long = "username")]
        username: String,
        #[arg(short = 'p', long = "password")]
        password: String,
        #[arg(long = "role", default_value = "", help = "Role recorded with the session")]
        role: String,
    },
    /// Clear every stored session field
    Logout,
    /// Show the stored session and go to the landing route if logged in
    Status,
    Get {
        path: String,
    },
    Post {
        path: String,
        #[arg(short = 'd', long = "data", help = "JSON request body")]
        data: Option<String>,
    },
    Put {
        path: String,
        #[arg(short = 'd', long = "data", help = "JSON request body")]
        data: Option<String>,
    },
    Delete {
        path: String,
    },
    /// POST a JSON object as multipart form fields
    PostForm {
        path: String,
        #[arg(short = 'd', long = "data", help = "JSON object of form fields")]
        data: String,
    },
    /// Fetch a binary file (no credentials attached) and save it
    Download {
        path: String,
        #[arg(short = 'd', long = "data", help = "JSON request body")]
        data: Option<String>,
    },
}
