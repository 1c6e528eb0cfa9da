mod app;
mod control;
mod input;
mod log;
mod store;
mod sync;
mod ui;

use anyhow::Result;
use app::{App, ViewMode};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{handle_event, Action};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use std::io::{stdout, IsTerminal};
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "version" | "--version" | "-v" => {
                println!("p9s {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "help" | "--help" | "-h" => {
                println!("p9s - deployment console for applications and pipeds");
                println!();
                println!("Usage:");
                println!("  p9s           Launch the TUI console");
                println!("  p9s version   Show version");
                println!();
                println!("Configuration:");
                println!("  ~/.p9s/config.toml   [control_plane] api_key, base_url, poll_interval");
                println!("  P9S_API_KEY          overrides the configured api_key");
                return Ok(());
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'p9s help' for usage.");
                std::process::exit(1);
            }
        }
    }

    if !stdout().is_terminal() {
        eprintln!("Error: p9s requires an interactive terminal (TTY).");
        std::process::exit(1);
    }

    let mut app = App::new()?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut needs_draw = true;

    loop {
        if app.check_fetcher_dirty() {
            needs_draw = true;
        }

        if app.drain_sync_events() {
            needs_draw = true;
        }

        if app.drain_piped_messages() {
            needs_draw = true;
        }

        if app.view_mode() == ViewMode::Log && log::take_dirty() {
            needs_draw = true;
        }

        if needs_draw {
            terminal.draw(|f| {
                let area = f.area();
                match app.view_mode() {
                    ViewMode::List | ViewMode::Filter => {
                        ui::render_application_list(f, app, area);
                    }
                    ViewMode::Detail => {
                        ui::render_application_detail(f, app, area);
                    }
                    ViewMode::StrategyMenu => {
                        ui::render_application_detail(f, app, area);
                        ui::render_strategy_menu(f, app, area);
                    }
                    ViewMode::Pipeds => {
                        ui::render_piped_list(f, app, area);
                    }
                    ViewMode::PipedMenu => {
                        ui::render_piped_list(f, app, area);
                        ui::render_piped_menu(f, app, area);
                    }
                    ViewMode::PipedKey => {
                        ui::render_piped_list(f, app, area);
                        if let Some(key) = app.piped_key() {
                            ui::render_piped_key(f, key, area);
                        }
                    }
                    ViewMode::Help => {
                        ui::render_application_list(f, app, area);
                        ui::render_help(f, area);
                    }
                    ViewMode::Log => {
                        let entries = log::entries();
                        ui::render_log_panel(f, &entries, app.log_scroll(), area);
                    }
                    ViewMode::ConfirmQuit => {
                        ui::render_application_list(f, app, area);
                        let syncing = app.syncing_names();
                        ui::render_confirm_quit(f, &syncing, area);
                    }
                }
            })?;
            needs_draw = false;
        }

        if event::poll(Duration::from_millis(16))? {
            loop {
                let ev = event::read()?;

                if matches!(ev, event::Event::Resize(_, _)) {
                    needs_draw = true;
                }

                let action = handle_event(&ev, app.view_mode());
                let is_noop = action == Action::None;
                process_action(app, action);
                if !is_noop {
                    needs_draw = true;
                }

                if app.should_quit() {
                    break;
                }
                if !event::poll(Duration::from_millis(0))? {
                    break;
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn process_action(app: &mut App, action: Action) {
    match action {
        Action::Quit => {
            if app.syncing_names().is_empty() {
                app.quit();
            } else {
                app.set_view_mode(ViewMode::ConfirmQuit);
            }
        }
        Action::ForceQuit | Action::ConfirmQuit => app.quit(),
        Action::CancelQuit => app.cancel_quit(),
        Action::MoveUp => match app.view_mode() {
            ViewMode::StrategyMenu => app.strategy_menu_up(),
            ViewMode::PipedMenu => app.piped_menu_up(),
            _ => app.move_up(),
        },
        Action::MoveDown => match app.view_mode() {
            ViewMode::StrategyMenu => app.strategy_menu_down(),
            ViewMode::PipedMenu => app.piped_menu_down(),
            _ => app.move_down(),
        },
        Action::MoveToTop => app.move_to_top(),
        Action::MoveToBottom => app.move_to_bottom(),
        Action::Select => match app.view_mode() {
            ViewMode::StrategyMenu => app.strategy_menu_confirm(),
            ViewMode::PipedMenu => app.piped_menu_confirm(),
            _ => {}
        },
        Action::Back => match app.view_mode() {
            ViewMode::Detail | ViewMode::Pipeds | ViewMode::Help | ViewMode::Log => {
                app.set_view_mode(ViewMode::List)
            }
            ViewMode::StrategyMenu => app.set_view_mode(ViewMode::Detail),
            ViewMode::PipedMenu => app.set_view_mode(ViewMode::Pipeds),
            ViewMode::PipedKey => app.dismiss_piped_key(),
            ViewMode::Filter => app.set_view_mode(ViewMode::List),
            ViewMode::List => {
                if app.has_active_filter() {
                    app.clear_filter();
                }
            }
            _ => {}
        },
        Action::ShowDetail => {
            if app.selected_row().is_some() {
                app.set_view_mode(ViewMode::Detail);
            }
        }
        Action::ShowPipeds => app.set_view_mode(ViewMode::Pipeds),
        Action::ShowHelp => {
            if app.view_mode() == ViewMode::Help {
                app.set_view_mode(ViewMode::List);
            } else {
                app.set_view_mode(ViewMode::Help);
            }
        }
        Action::ToggleFilter => app.set_view_mode(ViewMode::Filter),
        Action::FilterInput(c) => app.filter_push(c),
        Action::FilterBackspace => app.filter_pop(),
        Action::FilterSubmit => app.set_view_mode(ViewMode::List),
        Action::CycleSort => app.cycle_sort(),
        Action::Refresh => {
            app.kick_fetcher();
            app.refresh();
        }
        Action::Sync => {
            app.trigger_sync();
        }
        Action::OpenStrategyMenu => app.set_view_mode(ViewMode::StrategyMenu),
        Action::OpenPipedMenu => {
            if app.selected_piped().is_some() {
                app.set_view_mode(ViewMode::PipedMenu);
            }
        }
        Action::DismissPipedKey => app.dismiss_piped_key(),
        Action::ToggleLog => {
            if app.view_mode() == ViewMode::Log {
                app.set_view_mode(ViewMode::List);
            } else {
                app.log_scroll_to_bottom();
                app.set_view_mode(ViewMode::Log);
            }
        }
        Action::ClearLog => app.clear_log(),
        Action::None => {}
    }
}
