use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use life_dashboard::calendar::view::{DeleteAction, Submission};
use life_dashboard::calendar::Granularity;
use life_dashboard::client::Client;
use life_dashboard::item::{parse_date, parse_time};
use life_dashboard::preferences::Preferences;
use life_dashboard::storage::LocalStorage;
use life_dashboard::{CalendarView, DateRange, RemoteTodoStore, TodoId, TodoPatch};

/// Plan your days from the terminal, against your dashboard server
#[derive(Parser)]
#[command(name = "planner", version)]
struct Cli {
    /// Base URL of the dashboard server
    #[arg(long, env = "DASHBOARD_URL", default_value = "http://localhost:3000")]
    url: String,

    /// File that stores the token and the preferences
    #[arg(long, env = "DASHBOARD_STORAGE", default_value = "dashboard_storage.json")]
    storage: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remember the bearer token used to talk to the server
    Login { token: String },
    /// Forget the bearer token
    Logout,
    /// Show the todos of a day, a week or a month
    Show {
        #[arg(long, default_value = "week")]
        view: Granularity,
        /// Reference date (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        hide_completed: bool,
        #[arg(long)]
        hide_incomplete: bool,
        /// Only print the number of todos per day (month view)
        #[arg(long)]
        grid: bool,
    },
    /// Create a todo
    Add {
        title: String,
        /// YYYY-MM-DD or YYYY-MM-DD..YYYY-MM-DD, today by default
        #[arg(long)]
        dates: Option<DateRange>,
        /// HH:MM. Makes the todo a timed one
        #[arg(long)]
        start_time: Option<String>,
        /// HH:MM. Makes the todo a timed one
        #[arg(long)]
        end_time: Option<String>,
    },
    /// Rename a todo
    Rename { id: String, title: String },
    /// Mark a todo as done, or as not done
    Toggle { id: String },
    /// Move a todo to another start date, keeping its duration
    Move { id: String, date: String },
    /// Delete a todo (needs --yes to actually delete)
    Remove {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Print the stored preferences
    Prefs,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut storage = LocalStorage::open(&cli.storage);

    match cli.command {
        Command::Login { token } => {
            storage.set_auth_token(token)?;
            println!("Token saved to {:?}", storage.backing_file());
            return Ok(());
        },
        Command::Logout => {
            storage.clear_auth_token()?;
            println!("Signed out");
            return Ok(());
        },
        Command::Prefs => {
            let prefs = Preferences::load(&storage);
            println!("theme:        {}", prefs.theme);
            println!("custom theme: {:?}", prefs.custom_theme);
            let menu: Vec<String> = prefs.menu_order.iter().map(|p| p.to_string()).collect();
            println!("menu:         {}", menu.join(", "));
            println!("landing page: {}", prefs.default_page);
            return Ok(());
        },
        _ => {},
    }

    let client = Client::from_storage(&cli.url, &storage)?;
    if client.is_authenticated() == false {
        log::warn!("Not signed in, the todo list will be empty. Use `planner login <token>`");
    }
    let mut store = RemoteTodoStore::new(client);
    store.load().await?;

    match cli.command {
        Command::Show { view, date, hide_completed, hide_incomplete, grid } => {
            let date = match date {
                None => life_dashboard::utils::today(),
                Some(d) => parse_date(&d)?,
            };
            let mut calendar = CalendarView::new(view, date, false);
            if hide_completed { calendar.toggle_show_completed(); }
            if hide_incomplete { calendar.toggle_show_incomplete(); }
            if grid {
                life_dashboard::utils::print_month_grid(&calendar, store.todos());
            } else {
                life_dashboard::utils::print_view(&calendar, store.todos());
            }
        },
        Command::Add { title, dates, start_time, end_time } => {
            let dates = dates.unwrap_or_else(|| DateRange::single(life_dashboard::utils::today()));
            let mut calendar = CalendarView::new(Granularity::Day, dates.start(), true);
            calendar.open_add()?;
            if let Some(draft) = calendar.draft_mut() {
                draft.set_title(title);
                draft.set_end_date(dates.end());
                if start_time.is_some() || end_time.is_some() {
                    draft.set_all_day(false);
                }
                if let Some(t) = start_time {
                    draft.set_start_time(parse_time(&t)?);
                }
                if let Some(t) = end_time {
                    draft.set_end_time(parse_time(&t)?);
                }
            }
            let submission = calendar.submit()?;
            store.submit(submission).await?;
            if let Some(todo) = store.todos().last() {
                life_dashboard::utils::print_todo(todo);
            }
        },
        Command::Rename { id, title } => {
            let patch = TodoPatch { title: Some(title), ..TodoPatch::default() };
            store.submit(Submission::Update(TodoId::from(id), patch)).await?;
        },
        Command::Toggle { id } => {
            let id = TodoId::from(id);
            store.toggle_complete(&id).await?;
            if let Some(todo) = store.get(&id) {
                life_dashboard::utils::print_todo(todo);
            }
        },
        Command::Move { id, date } => {
            let id = TodoId::from(id);
            store.reschedule(&id, parse_date(&date)?).await?;
            if let Some(todo) = store.get(&id) {
                life_dashboard::utils::print_todo(todo);
            }
        },
        Command::Remove { id, yes } => {
            let id = TodoId::from(id);
            let todo = store.get(&id).cloned().ok_or_else(|| format!("No todo with id {}", id))?;
            let mut calendar = CalendarView::new(Granularity::Day, todo.start_date(), true);
            calendar.open_edit(&todo)?;
            let mut action = calendar.press_delete();
            if yes {
                action = calendar.press_delete();
            }
            match action {
                DeleteAction::Confirmed(id) => {
                    store.remove(&id).await?;
                    println!("Deleted {}", todo.title());
                },
                _ => println!("About to delete \"{}\". Run again with --yes to confirm.", todo.title()),
            }
        },
        Command::Login { .. } | Command::Logout | Command::Prefs => {},
    }

    Ok(())
}
