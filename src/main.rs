use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, io};
use user_insights::{
    config::{Cli, Config},
    data::DataStore,
    report::Report,
    state::AppState,
    ui,
};

fn init_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from(Cli::parse());
    init_logging(&config)?;
    let mut store = DataStore::new(&config.data_dir);
    if config.cache {
        store = store.with_cache();
    }
    log::info!("data dir: {}, mode: {}", store.base().display(), config.mode);

    if config.headless {
        let report = Report::build(&mut store, &config.selection, config.mode);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut state = AppState::new(store, config.mode, config.selection);
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui::draw(f, &state))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event::read()? {
                if state.handle_input(code) {
                    break;
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
