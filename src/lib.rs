pub mod cli;
pub mod config;
pub mod host;
pub mod models;
pub mod render;
pub mod session;
pub mod transport;
pub mod widget;

use cli::{ parse_command, Args };
use config::WidgetConfig;
use host::{ UiEvent, WidgetRuntime };
use log::{ info, warn };
use render::{ HtmlSnapshot, TextRenderer };
use std::error::Error;
use std::sync::Arc;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, BufReader };
use tokio::sync::mpsc;
use transport::{ ChatTransport, HttpTransport };
use url::Url;
use widget::WidgetController;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = WidgetConfig::resolve(args.widget_options()?);
    let origin = Url::parse(&args.origin)?;
    let endpoint = config.endpoint_url(Some(&origin))?;

    info!("--- Widget Configuration ---");
    info!("Endpoint: {}", endpoint);
    info!("Title: {}", config.title);
    info!("Position: {}", config.position);
    info!("Theme: {}", config.theme);
    info!("Auto Open: {}", config.auto_open);
    match &config.calendly_url {
        Some(url) => info!("Scheduling URL: {}", url),
        None => warn!("No scheduling URL configured; scheduling falls back to phone instructions."),
    }
    info!("----------------------------");

    let transport: Arc<dyn ChatTransport> = Arc::new(HttpTransport::new(endpoint)?);
    let controller = WidgetController::new(config);

    let (tx, rx) = mpsc::channel(32);
    let reader = tokio::spawn(read_events(BufReader::new(tokio::io::stdin()), tx));

    if args.html {
        let mut runtime = WidgetRuntime::new(
            controller,
            transport,
            HtmlSnapshot::new()
        ).with_paced_input();
        runtime.run(rx).await?;
        println!("{}", runtime.into_renderer().into_document());
    } else {
        let mut runtime = WidgetRuntime::new(
            controller,
            transport,
            TextRenderer::new(std::io::stdout())
        ).with_paced_input();
        runtime.run(rx).await?;
    }

    reader.abort();
    Ok(())
}

/// Feeds input lines to the widget until EOF or the runtime goes away. EOF
/// ends the session only after any pending reply has arrived.
async fn read_events<R: AsyncBufRead + Unpin>(input: R, tx: mpsc::Sender<UiEvent>) {
    let mut lines = input.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                for event in parse_command(&line) {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
            }
            Ok(None) => {
                let _ = tx.send(UiEvent::EndOfInput).await;
                return;
            }
            Err(e) => {
                warn!("Failed to read input: {}", e);
                let _ = tx.send(UiEvent::EndOfInput).await;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn piped_lines_end_with_end_of_input() {
        let (tx, mut rx) = mpsc::channel(16);
        read_events(&b"/open\nhello\n/menu 2\n"[..], tx).await;

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                UiEvent::Toggle,
                UiEvent::Input("hello".into()),
                UiEvent::Submit,
                UiEvent::QuickAction(models::QuickAction::Estimate),
                UiEvent::EndOfInput
            ]
        );
    }
}
