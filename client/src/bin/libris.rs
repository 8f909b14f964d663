use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::Level;

use libris_client::{ApiClient, App, RowMode};
use libris_core::record::RecordId;

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::WARN).init();

    let base_url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    let mut app = App::new(ApiClient::new(base_url));

    app.refresh().await;
    render(&app);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "list" => app.refresh().await,
            "add" => {
                let mut parts = rest.split('|').map(str::trim);
                let (title, author, genre, price) = (
                    parts.next().unwrap_or_default().to_string(),
                    parts.next().unwrap_or_default().to_string(),
                    parts.next().unwrap_or_default().to_string(),
                    parts.next().unwrap_or_default().to_string(),
                );
                app.state.edit_create_draft(|draft| {
                    draft.title = title;
                    draft.author = author;
                    draft.genre = genre;
                    draft.price = price;
                });
                app.submit_create().await;
            }
            "edit" => match row_id(&app, rest) {
                Some(id) => {
                    app.state.begin_edit(id);
                }
                None => println!("Unknown row"),
            },
            "set" => {
                let (field, value) = match rest.split_once(' ') {
                    Some((field, value)) => (field, value.trim().to_string()),
                    None => (rest, String::new()),
                };
                let assign = |value: String| {
                    move |draft: &mut libris_client::Draft| match field {
                        "title" => draft.title = value,
                        "author" => draft.author = value,
                        "genre" => draft.genre = value,
                        "price" => draft.price = value,
                        _ => println!("Unknown field"),
                    }
                };
                if app.state.editing_id().is_some() {
                    app.state.edit_row_draft(assign(value));
                } else {
                    app.state.edit_create_draft(assign(value));
                }
            }
            "save" => app.submit_edit().await,
            "cancel" => app.state.cancel_edit(),
            "delete" => match row_id(&app, rest) {
                Some(id) => app.delete(id).await,
                None => println!("Unknown row"),
            },
            "quit" | "exit" => break,
            "" => {}
            _ => println!("Commands: list | add t|a|g|p | edit N | set FIELD VALUE | save | cancel | delete N | quit"),
        }

        render(&app);
    }

    Ok(())
}

/// Rows are addressed by their 1-based position in the rendered list.
fn row_id(app: &App, arg: &str) -> Option<RecordId> {
    let index: usize = arg.parse().ok()?;
    app.state.rows().get(index.checked_sub(1)?).map(|row| row.record.id)
}

fn render(app: &App) {
    if let Some(message) = app.state.form_error() {
        println!("! {}", message);
    }
    for (index, row) in app.state.rows().iter().enumerate() {
        let record = &row.record;
        let line = format!(
            "{:>3}. {} by {} ({}) ${}",
            index + 1,
            record.title().unwrap_or("?"),
            record.author().unwrap_or("?"),
            record.genre().unwrap_or("?"),
            record.price().map(|p| p.to_string()).unwrap_or_else(|| "?".to_string()),
        );
        match &row.mode {
            RowMode::Editing { draft } => {
                println!("{}  [editing: {} | {} | {} | {}]", line, draft.title, draft.author, draft.genre, draft.price)
            }
            RowMode::Viewing => println!("{}", line),
        }
    }
}
