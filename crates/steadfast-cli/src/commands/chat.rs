use clap::Subcommand;
use serde_json::json;
use steadfast_core::chat::{self, typing_delay, Transcript, QUICK_PROMPTS};
use steadfast_core::{Config, Destination};

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Print the conversation
    Show,
    /// Send a message and wait for the reply
    Send {
        text: String,
        /// Reply immediately instead of simulating typing
        #[arg(long)]
        no_delay: bool,
    },
    /// Forget the conversation
    Clear,
}

pub fn run(action: ChatAction) -> CliResult {
    let config = Config::load_or_default();
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::AiTherapist)?;

    match action {
        ChatAction::Show => {
            let transcript = Transcript::load(&db, app.now());
            let prompts: &[&str] = if transcript.shows_quick_prompts() {
                &QUICK_PROMPTS
            } else {
                &[]
            };
            print_json(&json!({
                "messages": transcript.messages(),
                "quick_prompts": prompts,
            }))?;
        }
        ChatAction::Send { text, no_delay } => {
            let mut transcript = Transcript::load(&db, app.now());
            if transcript.push_user(&text, app.now()).is_none() {
                tracing::debug!("ignoring blank chat input");
                return print_json(&json!({ "messages": transcript.messages() }));
            }
            transcript.persist(&db)?;

            let mut rng = chat::reply_rng(config.chat.seed);
            if !no_delay {
                let delay = typing_delay(&config.chat, &mut rng);
                wait(delay.to_std().unwrap_or_default())?;
            }
            let reply = transcript.reply_to(&text, app.now(), &mut rng);
            transcript.persist(&db)?;
            print_json(&reply)?;
        }
        ChatAction::Clear => {
            Transcript::clear(&db)?;
            println!("chat cleared");
        }
    }
    Ok(())
}

fn wait(delay: std::time::Duration) -> CliResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(tokio::time::sleep(delay));
    Ok(())
}
