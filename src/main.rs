use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use proposito::app::controllers::reading::{FetchTicket, SessionEvent};
use proposito::app::infrastructure::logging;
use proposito::app::services::fetcher::ContentFetcher;
use proposito::app::{AppConfig, AppState, DurableStore, FileStore, HttpFetcher, MemoryStore, Message};
use proposito::ui::commands::{check_chapter, is_confirmation, parse_command, Command, HELP};
use proposito::ui::theme::palette;
use proposito::ui::view;

/// Everything the control loop reacts to.
enum Event {
    Line(String),
    InputClosed,
    App(Message),
}

/// Run the fetch off the control thread and post the result back.
fn spawn_fetch(fetcher: &Arc<HttpFetcher>, ticket: FetchTicket, sender: &Sender<Event>) {
    let fetcher = Arc::clone(fetcher);
    let sender = sender.clone();
    thread::spawn(move || {
        let result = fetcher.fetch(ticket.book(), ticket.chapter());
        let _ = sender.send(Event::App(Message::FetchCompleted(ticket, result)));
    });
}

fn spawn_input(sender: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = sender.send(Event::InputClosed);
    });
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

/// Print notices and react to session events after each step.
fn present(app: &mut AppState) {
    let p = palette(app.preferences().dark_mode);
    for event in app.take_session_events() {
        match event {
            // New chapter: start the reading view from the top
            SessionEvent::ChapterChanged(pointer) => {
                print!("\x1b[2J\x1b[H");
                println!("{}", p.paint(p.muted, &format!("Carregando {pointer}...")));
            }
            SessionEvent::BookSelected { .. }
            | SessionEvent::Loaded { .. }
            | SessionEvent::Failed { .. } => {
                println!("{}", view::render_chapter(app.session(), app.preferences()));
            }
            SessionEvent::Discarded(_) => {}
        }
    }
    for notice in app.take_notices() {
        println!("{}", view::render_notice(&notice, &p));
    }
}

fn main() {
    logging::init();

    let config = AppConfig::load();
    let ephemeral = std::env::args().skip(1).any(|arg| arg == "--ephemeral");
    let store: Rc<dyn DurableStore> = if ephemeral {
        tracing::info!("using in-memory store");
        Rc::new(MemoryStore::new())
    } else {
        let store = FileStore::new(config.store_dir());
        tracing::info!(dir = %store.dir().display(), "using file store");
        Rc::new(store)
    };
    let fetcher = Arc::new(HttpFetcher::from_config(&config));

    let (sender, receiver) = mpsc::channel::<Event>();
    let mut app = AppState::new(store);

    println!("📖 Vida com Propósito: digite 'ajuda' para ver os comandos.");
    if let Some(ticket) = app.startup() {
        spawn_fetch(&fetcher, ticket, &sender);
    }
    present(&mut app);

    spawn_input(sender.clone());
    prompt();

    let mut awaiting_wipe_confirmation = false;
    let mut input_closed = false;

    while let Ok(event) = receiver.recv() {
        match event {
            Event::InputClosed => {
                input_closed = true;
            }
            Event::App(message) => {
                if let Some(ticket) = app.dispatch(message) {
                    spawn_fetch(&fetcher, ticket, &sender);
                }
                present(&mut app);
                if !input_closed {
                    prompt();
                }
            }
            Event::Line(line) if awaiting_wipe_confirmation => {
                awaiting_wipe_confirmation = false;
                if is_confirmation(&line) {
                    app.dispatch(Message::WipeAllData);
                } else {
                    println!("Nada foi apagado.");
                }
                present(&mut app);
                prompt();
            }
            Event::Line(line) => {
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::App(message))) => {
                        let allowed = match &message {
                            Message::SelectChapter(chapter) => {
                                check_chapter(app.session().book(), *chapter)
                            }
                            _ => Ok(()),
                        };
                        match allowed {
                            Ok(()) => {
                                if let Some(ticket) = app.dispatch(message) {
                                    spawn_fetch(&fetcher, ticket, &sender);
                                }
                            }
                            Err(msg) => println!("{msg}"),
                        }
                    }
                    Ok(Some(Command::ListBooks)) => println!("{}", view::render_books()),
                    Ok(Some(Command::ListFavorites)) => {
                        let prefs = *app.preferences();
                        println!("{}", view::render_favorites(app.reload_favorites(), &prefs));
                    }
                    Ok(Some(Command::RemoveFavoriteAt(index))) => {
                        let entry = index
                            .checked_sub(1)
                            .and_then(|i| app.favorites().get(i).cloned());
                        match entry {
                            Some(entry) => {
                                app.dispatch(Message::RemoveFavorite(entry));
                            }
                            None => println!("Não há favorito número {index}."),
                        }
                    }
                    Ok(Some(Command::Status)) => println!(
                        "{}",
                        view::render_status(app.session(), app.preferences(), app.favorites().len())
                    ),
                    Ok(Some(Command::WipeRequested)) => {
                        println!(
                            "Tem certeza que deseja limpar todos os dados? Esta ação não pode ser desfeita \
                             e você perderá todos os seus versículos favoritos e configurações. (s/N)"
                        );
                        awaiting_wipe_confirmation = true;
                    }
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Err(msg) => println!("{msg}"),
                }
                present(&mut app);
                prompt();
            }
        }

        // Piped input may end before the last chapter arrives
        if input_closed && !app.has_fetches_in_flight() {
            break;
        }
    }

    tracing::info!("bye");
}
