use std::io::Write;
use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::io::Stdin;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::AuthServiceName;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Message;
use crate::domain::models::SlashCommand;
use crate::domain::models::StoreArc;
use crate::domain::models::TokenInfo;
use crate::domain::services::AppState;
use crate::domain::services::ExportFormat;
use crate::domain::services::Exports;
use crate::domain::services::HistoryBuffer;
use crate::domain::services::HistoryDirection;
use crate::domain::services::SessionManager;
use crate::domain::services::CHAT_SURFACE;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::credentials::CredentialManager;
use crate::infrastructure::stores::DiskStore;

pub fn help_text() -> String {
    return r#"COMMANDS:
- /help (/h): Show this help menu
- /token (/t): Show details of the stored access token
- /export <format> (/e): Export the chat to txt, json, csv, or html
- /back (/b): Recall an older input from history
- /fwd (/f): Step back towards your unsent draft
- /clearhistory: Clear the stored input history
- /logout: Sign out and return to the login prompt
- /quit (/q, /exit): Quit

Press enter on an empty line to resend a recalled history entry."#
        .to_string();
}

type InputLines = Lines<BufReader<Stdin>>;

async fn read_line(reader: &mut InputLines, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let line = reader.next_line().await?;
    return Ok(line.map(|e| return e.trim().to_string()));
}

fn print_error(text: &str) {
    eprintln!("{}", Paint::red(text));
}

fn print_token_info(info: Option<TokenInfo>) {
    let info = match info {
        Some(info) => info,
        None => {
            println!("No token in storage.");
            return;
        }
    };

    let format_ts = |ts: i64| {
        return match Utc.timestamp_opt(ts, 0).single() {
            Some(dt) => dt.to_rfc3339(),
            None => ts.to_string(),
        };
    };

    println!("Subject:   {}", info.sub.unwrap_or_else(|| return "-".to_string()));
    println!("Issuer:    {}", info.iss.unwrap_or_else(|| return "-".to_string()));
    println!("Audience:  {}", info.aud.unwrap_or_default().join(", "));
    println!("Roles:     {}", info.roles.unwrap_or_default().join(", "));
    println!("Issued:    {}", format_ts(info.iat));
    println!("Expires:   {}", format_ts(info.exp));

    if !info.is_valid {
        println!("{}", Paint::red("This token has expired."));
    } else if info.is_expiring_soon {
        println!("{}", Paint::yellow("This token expires in less than five minutes."));
    } else {
        println!("{}", Paint::green("This token is valid."));
    }
}

fn print_message(message: &Message) {
    let label = message.author.to_string();
    let line = format!(
        "[{timestamp}] {label}: {text}",
        timestamp = message.timestamp.format("%H:%M:%S"),
        text = message.text
    );

    if message.author == Author::User {
        println!("{}", Paint::blue(line));
    } else {
        println!("{line}");
    }
}

/// Runs the login/signup prompt until a session exists. Returns false when
/// the user asked to quit instead of authenticating.
async fn authenticate(
    session_manager: &mut SessionManager,
    reader: &mut InputLines,
) -> Result<bool> {
    while session_manager.current_user().is_none() {
        let choice = match read_line(reader, "login, signup, or quit? ").await? {
            Some(choice) => choice,
            None => return Ok(false),
        };

        match choice.as_str() {
            "login" => {
                let email = match read_line(reader, "Email: ").await? {
                    Some(email) => email,
                    None => return Ok(false),
                };
                let password = match read_line(reader, "Password: ").await? {
                    Some(password) => password,
                    None => return Ok(false),
                };

                match session_manager.login(&email, &password).await {
                    Ok(session) => {
                        println!("Welcome back, {}!", session.display_name);
                    }
                    Err(err) => {
                        print_error(&err.to_string());
                    }
                }
            }
            "signup" => {
                let name = match read_line(reader, "Name: ").await? {
                    Some(name) => name,
                    None => return Ok(false),
                };
                let email = match read_line(reader, "Email: ").await? {
                    Some(email) => email,
                    None => return Ok(false),
                };
                let password = match read_line(reader, "Password: ").await? {
                    Some(password) => password,
                    None => return Ok(false),
                };

                match session_manager.signup(&name, &email, &password).await {
                    Ok(()) => {
                        println!("Account created. You can login now.");
                    }
                    Err(err) => {
                        print_error(&err.to_string());
                    }
                }
            }
            "quit" | "q" | "exit" => return Ok(false),
            _ => {
                println!("Please answer login, signup, or quit.");
            }
        }
    }

    return Ok(true);
}

fn handle_export(command: &SlashCommand, app_state: &AppState) {
    let format = command
        .args
        .first()
        .cloned()
        .and_then(ExportFormat::parse);

    let format = match format {
        Some(format) => format,
        None => {
            println!("Usage: /export <txt|json|csv|html>");
            return;
        }
    };

    let transcript = app_state.transcript();
    if transcript.is_empty() {
        println!("Nothing to export yet.");
        return;
    }

    match Exports::default().export(format, &transcript) {
        Ok(file_path) => {
            println!("Exported chat to {}", file_path.to_string_lossy());
        }
        Err(err) => {
            print_error(&format!("Export failed: {err}"));
        }
    }
}

enum ChatOutcome {
    Quit,
    Logout,
}

async fn chat_loop(
    session_manager: &mut SessionManager,
    history: &mut HistoryBuffer,
    reader: &mut InputLines,
) -> Result<ChatOutcome> {
    let backend_name = match BackendName::parse(Config::get(ConfigKey::Backend)) {
        Some(name) => name,
        None => bail!(format!(
            "Unknown backend: {}",
            Config::get(ConfigKey::Backend)
        )),
    };
    let backend = BackendManager::get(backend_name)?;

    if let Err(err) = backend.health_check().await {
        tracing::warn!(err = ?err, "Backend health check failed");
        print_error(&format!("Backend is not ready: {err}"));
    }

    let display_name = match session_manager.current_user() {
        Some(session) => session.display_name.to_string(),
        None => bail!("Chat loop started without a session"),
    };

    let mut app_state = AppState::new(&display_name);
    print_message(&app_state.messages[0]);

    let mut recalled = "".to_string();

    loop {
        let line = match read_line(reader, "> ").await? {
            Some(line) => line,
            None => return Ok(ChatOutcome::Quit),
        };

        let text = if line.is_empty() {
            if recalled.is_empty() {
                continue;
            }
            std::mem::take(&mut recalled)
        } else {
            line
        };

        if let Some(command) = SlashCommand::parse(&text) {
            if command.is_quit() {
                return Ok(ChatOutcome::Quit);
            }
            if command.is_help() {
                println!("{}", help_text());
                continue;
            }
            if command.is_logout() {
                session_manager.logout();
                println!("Signed out.");
                return Ok(ChatOutcome::Logout);
            }
            if command.is_token_info() {
                print_token_info(session_manager.token_info());
                continue;
            }
            if command.is_export() {
                handle_export(&command, &app_state);
                continue;
            }
            if command.is_history_older() || command.is_history_newer() {
                let direction = if command.is_history_older() {
                    HistoryDirection::Older
                } else {
                    HistoryDirection::Newer
                };

                history.stash_draft(CHAT_SURFACE, &recalled);
                recalled = history.navigate(CHAT_SURFACE, direction);
                if recalled.is_empty() {
                    println!("(empty)");
                } else {
                    println!("(history) {recalled}");
                }
                continue;
            }
            if command.is_clear_history() {
                history.clear(CHAT_SURFACE);
                recalled = "".to_string();
                println!("Input history cleared.");
                continue;
            }
        }

        let transcript = app_state.transcript();
        let message = Message::new(Author::User, &text);
        print_message(&message);
        app_state.add_message(message);
        history.record(CHAT_SURFACE, &text);
        recalled = "".to_string();

        app_state.waiting_for_backend = true;
        match backend.get_completion(BackendPrompt::new(text, transcript)).await {
            Ok(res) => {
                app_state.handle_backend_response(res);
            }
            Err(err) => {
                tracing::error!(err = ?err, "Completion request failed");
                app_state.add_error(&err.to_string());
                app_state.waiting_for_backend = false;
            }
        }

        if let Some(message) = app_state.messages.last() {
            print_message(message);
        }
    }
}

pub async fn start() -> Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    // Logout tears down everything built from the session, so each pass of
    // this loop rebuilds the store, services, and app state from scratch.
    loop {
        let store: StoreArc = Arc::new(DiskStore::new(path::PathBuf::from(Config::get(
            ConfigKey::DataDir,
        ))));

        let auth_service = match AuthServiceName::parse(Config::get(ConfigKey::AuthService)) {
            Some(name) => name,
            None => bail!(format!(
                "Unknown auth service: {}",
                Config::get(ConfigKey::AuthService)
            )),
        };
        let credentials = CredentialManager::get(auth_service, store.clone())?;

        let mut session_manager = SessionManager::new(store.clone(), credentials);
        session_manager.hydrate();

        let mut history = HistoryBuffer::new(store.clone());
        history.migrate_legacy();

        if !authenticate(&mut session_manager, &mut reader).await? {
            return Ok(());
        }

        match chat_loop(&mut session_manager, &mut history, &mut reader).await? {
            ChatOutcome::Quit => return Ok(()),
            ChatOutcome::Logout => continue,
        }
    }
}
