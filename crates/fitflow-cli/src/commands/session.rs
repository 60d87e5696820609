use std::io::Write;

use clap::Subcommand;
use serde::{Deserialize, Serialize};
use serde_json::json;

use fitflow_core::leveling::session_award;
use fitflow_core::progress::grant_xp;
use fitflow_core::storage::{Config, Database};
use fitflow_core::timer::{
    format_hms, NotificationSink, PeriodicNotifier, Reminder, FINISH_GRACE_SECS,
};
use fitflow_core::{SessionState, WorkoutSession};

use super::{print_json, runtime, signed_client, today, CliResult};

const SESSION_KEY: &str = "workout_session";

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a workout session
    Start,
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Finish the session and bank the XP
    Finish,
    /// Abandon the session (no XP)
    Cancel,
    /// Print current session state as JSON
    Status,
    /// Run a session in the foreground at 1 Hz (Ctrl-C cancels)
    Run {
        /// Auto-finish after this many minutes
        #[arg(long)]
        minutes: Option<u64>,
    },
}

/// A session parked in the kv store between invocations. On load, the
/// wall-clock gap since `saved_at` is replayed as ticks.
#[derive(Serialize, Deserialize)]
struct ParkedSession {
    session: WorkoutSession,
    saved_at: i64,
}

fn now_epoch() -> i64 {
    chrono::Utc::now().timestamp()
}

fn load_parked(db: &Database) -> Result<Option<WorkoutSession>, Box<dyn std::error::Error>> {
    let Some(raw) = db.kv_get(SESSION_KEY)? else {
        return Ok(None);
    };
    let parked: ParkedSession = serde_json::from_str(&raw)?;
    let mut session = parked.session;

    // Replay the seconds that passed while no command was running. The
    // notifier is rebuilt per invocation, so reminders that came due in
    // the gap are reported now.
    let gap = (now_epoch() - parked.saved_at).max(0) as u64;
    let mut notifier = notifier_from_config()?;
    let mut sink = ConsoleSink;
    for _ in 0..gap {
        if let Some(event) = session.tick() {
            print_json(&event)?;
        }
        observe(&mut notifier, &mut sink, &session);
    }
    Ok(Some(session))
}

fn save_parked(db: &Database, session: &WorkoutSession) -> CliResult {
    let parked = ParkedSession {
        session: session.clone(),
        saved_at: now_epoch(),
    };
    db.kv_set(SESSION_KEY, &serde_json::to_string(&parked)?)?;
    Ok(())
}

/// Notifier built from config; `None` when notifications are disabled.
fn notifier_from_config() -> Result<Option<PeriodicNotifier>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if !config.notifications.enabled {
        return Ok(None);
    }
    Ok(Some(PeriodicNotifier::new(
        config.notifications.motivational_quotes.clone(),
    )))
}

fn observe(
    notifier: &mut Option<PeriodicNotifier>,
    sink: &mut ConsoleSink,
    session: &WorkoutSession,
) {
    if let Some(notifier) = notifier {
        for reminder in notifier.observe(session.elapsed_secs()) {
            sink.notify(&reminder);
        }
    }
}

/// Synchronous console notification sink.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, reminder: &Reminder) {
        match reminder {
            Reminder::Hydration => {
                println!("\nHydration check! Take a sip of water.");
            }
            Reminder::Motivation { quote } => {
                println!("\n\"{quote}\"");
            }
        }
    }
}

pub fn run(action: SessionAction) -> CliResult {
    let db = Database::open()?;

    match action {
        SessionAction::Start => {
            if let Some(existing) = load_parked(&db)? {
                if !existing.state().is_terminal() {
                    save_parked(&db, &existing)?;
                    return Err("a session is already in progress".into());
                }
            }
            let mut session = WorkoutSession::new();
            if let Some(event) = session.start() {
                print_json(&event)?;
            }
            save_parked(&db, &session)?;
        }
        SessionAction::Pause => {
            let mut session = required_session(&db)?;
            match session.pause() {
                Some(event) => print_json(&event)?,
                None => print_json(&session.snapshot())?,
            }
            save_parked(&db, &session)?;
        }
        SessionAction::Resume => {
            let mut session = required_session(&db)?;
            match session.resume() {
                Some(event) => print_json(&event)?,
                None => print_json(&session.snapshot())?,
            }
            save_parked(&db, &session)?;
        }
        SessionAction::Finish => {
            let mut session = required_session(&db)?;
            match session.finish() {
                Some(event) => print_json(&event)?,
                None => {
                    // Finishing from Idle or a terminal state is ignored.
                    print_json(&session.snapshot())?;
                    save_parked(&db, &session)?;
                    return Ok(());
                }
            }
            // Display-only celebration window before the final report.
            for _ in 0..FINISH_GRACE_SECS {
                std::thread::sleep(std::time::Duration::from_secs(1));
                if let Some(event) = session.tick() {
                    print_json(&event)?;
                }
            }
            db.kv_delete(SESSION_KEY)?;
            if let Some(duration) = session.take_report() {
                report_finished(&db, duration)?;
            }
        }
        SessionAction::Cancel => {
            let mut session = required_session(&db)?;
            match session.cancel() {
                Some(event) => print_json(&event)?,
                None => print_json(&session.snapshot())?,
            }
            db.kv_delete(SESSION_KEY)?;
        }
        SessionAction::Status => {
            match load_parked(&db)? {
                Some(session) => {
                    print_json(&session.snapshot())?;
                    if session.state().is_terminal() {
                        db.kv_delete(SESSION_KEY)?;
                    } else {
                        save_parked(&db, &session)?;
                    }
                }
                None => print_json(&WorkoutSession::new().snapshot())?,
            }
        }
        SessionAction::Run { minutes } => {
            if let Some(existing) = load_parked(&db)? {
                if !existing.state().is_terminal() {
                    save_parked(&db, &existing)?;
                    return Err("a session is already in progress".into());
                }
            }
            run_foreground(&db, minutes)?;
        }
    }
    Ok(())
}

fn required_session(db: &Database) -> Result<WorkoutSession, Box<dyn std::error::Error>> {
    load_parked(db)?.ok_or_else(|| "no session in progress (run `session start`)".into())
}

/// Convert the reported duration into an XP award and apply it.
fn report_finished(db: &Database, duration_secs: u64) -> CliResult {
    let amount = session_award(duration_secs);
    let (client, auth) = signed_client(db)?;
    if !auth.is_logged_in() {
        print_json(&json!({
            "duration_secs": duration_secs,
            "xp": null,
            "note": "not signed in; duration not banked",
        }))?;
        return Ok(());
    }
    let rt = runtime()?;
    match rt.block_on(grant_xp(&client, &auth, amount, today()))? {
        Some(granted) => print_json(&json!({
            "duration_secs": duration_secs,
            "xp_awarded": granted.amount,
            "new_xp": granted.award.new_xp,
            "new_level": granted.award.new_level,
            "leveled_up": granted.award.leveled_up,
            "current_streak": granted.profile.current_streak,
        }))?,
        None => print_json(&json!({ "duration_secs": duration_secs, "xp": null }))?,
    }
    Ok(())
}

/// Drive a full session at 1 Hz in the foreground.
///
/// The interval lives inside this function: every exit path (auto-finish,
/// Ctrl-C cancel) drops it and leaves no parked state behind.
fn run_foreground(db: &Database, minutes: Option<u64>) -> CliResult {
    let mut session = WorkoutSession::new();
    let mut notifier = notifier_from_config()?;
    let mut sink = ConsoleSink;
    let target_secs = minutes.map(|m| m * 60);

    if let Some(event) = session.start() {
        print_json(&event)?;
    }

    let rt = runtime()?;
    let finished = rt.block_on(async {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
        ticker.tick().await; // first tick completes immediately
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(event) = session.tick() {
                        println!();
                        if let Ok(json) = serde_json::to_string_pretty(&event) {
                            println!("{json}");
                        }
                    }
                    observe(&mut notifier, &mut sink, &session);

                    match session.state() {
                        SessionState::Running => {
                            print!("\r{}", format_hms(session.elapsed_secs()));
                            let _ = std::io::stdout().flush();
                            if let Some(target) = target_secs {
                                if session.elapsed_secs() >= target {
                                    if let Some(event) = session.finish() {
                                        println!();
                                        if let Ok(json) = serde_json::to_string_pretty(&event) {
                                            println!("{json}");
                                        }
                                    }
                                }
                            }
                        }
                        SessionState::Finished => break true,
                        _ => {}
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    if let Some(event) = session.cancel() {
                        println!();
                        if let Ok(json) = serde_json::to_string_pretty(&event) {
                            println!("{json}");
                        }
                    }
                    break false;
                }
            }
        }
    });

    if finished {
        if let Some(duration) = session.take_report() {
            report_finished(db, duration)?;
        }
    }
    Ok(())
}
