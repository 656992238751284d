//! Interactive terminal front end for a running mailwright server.

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mailwright::client::{Composer, HttpEmailApi, Status, DEFAULT_API_URL};

const HELP: &str = "\
Commands:
  to <addresses>     set recipients (comma-separated)
  prompt <text>      describe the email you want
  generate           draft an email from the prompt
  subject <text>     edit the subject line
  body               edit the body (finish with a line containing only '.')
  show               print the current form
  send               send the draft to the recipients
  help               show this message
  quit               exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let base_url =
        std::env::var("MAILWRIGHT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let api = HttpEmailApi::new(base_url);
    tracing::debug!(base_url = %api.base_url(), "Using compose API");

    let mut composer = Composer::new();
    let mut lines = BufReader::new(io::stdin()).lines();

    println!("{}", HELP);

    loop {
        prompt_marker().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let (command, rest) = match line.trim_start().split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "to" => composer.set_recipients(rest),
            "prompt" => composer.set_prompt(rest),
            "subject" => composer.set_subject(rest),
            "body" => {
                let body = read_body(&mut lines).await?;
                composer.set_body(body);
            }
            "generate" => {
                println!("Generating...");
                composer.generate(&api).await;
                print_status(&composer);
                if composer.status().is_none() {
                    show(&composer);
                }
            }
            "send" => {
                println!("Sending...");
                composer.send(&api).await;
                print_status(&composer);
            }
            "show" => show(&composer),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for a list.", other),
        }
    }

    Ok(())
}

async fn prompt_marker() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(b"> ").await?;
    stdout.flush().await
}

async fn read_body(lines: &mut Lines<BufReader<Stdin>>) -> io::Result<String> {
    let mut body = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line == "." {
            break;
        }
        body.push(line);
    }
    Ok(body.join("\n"))
}

fn print_status(composer: &Composer) {
    match composer.status() {
        Some(Status::Error(msg)) => println!("error: {}", msg),
        Some(Status::Success(msg)) => println!("{}", msg),
        None => {}
    }
}

fn show(composer: &Composer) {
    let draft = composer.draft();
    println!("To:      {}", composer.recipients());
    println!("Prompt:  {}", composer.prompt());
    println!("Subject: {}", draft.subject);
    println!("---");
    println!("{}", draft.body);
    println!("---");
}
