//! `forum`: command-line client for the discussion forum API.

mod render;
mod transport;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forum_core::{ForumClient, HttpRequest, NewPost, NewReply, DEFAULT_BASE_URL};
use tracing_subscriber::{fmt, EnvFilter};

use transport::Transport;

#[derive(Parser, Debug)]
#[command(name = "forum", version, about = "Browse and post to the discussion forum")]
struct Cli {
    /// Base URL of the forum API.
    #[arg(long, env = "FORUM_API_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List posts, most votes first.
    List,
    /// Show a post and its replies.
    Show { id: u64 },
    /// Start a new discussion.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Defaults to "Anonymous" on the server.
        #[arg(long)]
        author: Option<String>,
    },
    /// Reply to a post.
    Reply {
        id: u64,
        #[arg(long)]
        text: String,
    },
    /// Upvote a post.
    Upvote { id: u64 },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ForumClient::new(&cli.base_url);
    let transport = Transport::new();

    let output = run(cli.command, &client, &transport)?;
    print!("{output}");
    Ok(())
}

fn run(command: Command, client: &ForumClient, transport: &Transport) -> Result<String> {
    let send = |req: HttpRequest| {
        transport
            .execute(req)
            .with_context(|| format!("could not reach {}", client.base_url()))
    };

    let output = match command {
        Command::List => {
            let posts = client.parse_list_posts(send(client.build_list_posts())?)?;
            render::post_list(&posts)
        }
        Command::Show { id } => {
            let post = client.parse_get_post(send(client.build_get_post(id))?)?;
            render::post_detail(&post)
        }
        Command::Create {
            title,
            content,
            author,
        } => {
            let input = NewPost {
                title,
                content,
                author,
            };
            let post = client.parse_create_post(send(client.build_create_post(&input)?)?)?;
            format!("Created post #{}\n\n{}", post.id, render::post_detail(&post))
        }
        Command::Reply { id, text } => {
            let input = NewReply { text };
            let post = client.parse_add_reply(send(client.build_add_reply(id, &input)?)?)?;
            render::post_detail(&post)
        }
        Command::Upvote { id } => {
            let post = client.parse_upvote_post(send(client.build_upvote_post(id))?)?;
            format!("Upvoted post #{} ({} votes)\n", post.id, post.votes)
        }
    };
    Ok(output)
}
