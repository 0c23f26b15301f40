use chrono::{DateTime, Local, TimeZone};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

use crate::models::Data;
use super::reminder_tasks::run_birthday_check;

/// Start the scheduler that runs the birthday check once a day
///
/// The next run is recomputed from the cron schedule after every run, so the
/// wall-clock time holds across process restarts and long sleeps do not drift.
pub fn start_schedule_manager(http: Arc<serenity::Http>, data: Data) {
    tokio::spawn(async move {
        let schedule = match data.reminder_time.cron_schedule() {
            Ok(schedule) => schedule,
            Err(e) => {
                error!(
                    "Invalid cron expression '{}' for reminder schedule: {}",
                    data.reminder_time.cron_expression(),
                    e
                );
                return;
            }
        };

        info!(
            "Schedule manager started, birthday check runs daily at {}",
            data.reminder_time
        );

        loop {
            let now = Local::now();
            let Some(wait_duration) = time_until_next_run(&schedule, &now) else {
                warn!(
                    "No upcoming time found for reminder schedule with cron '{}'",
                    data.reminder_time.cron_expression()
                );
                break;
            };

            info!(
                "Next birthday check will run in {} minutes",
                wait_duration.as_secs() / 60
            );
            sleep(wait_duration).await;

            let today = Local::now().date_naive();
            if let Err(e) = run_birthday_check(&http, &data.db, today).await {
                error!("Failed to run birthday check: {}", e);
            }
        }

        info!("Schedule manager stopped");
    });
}

/// Time from `now` until the schedule next fires
fn time_until_next_run<Tz: TimeZone>(
    schedule: &cron::Schedule,
    now: &DateTime<Tz>,
) -> Option<Duration> {
    let next_time = schedule.after(now).next()?;
    Some(
        (next_time - now.clone())
            .to_std()
            .unwrap_or(Duration::from_secs(60)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ReminderTime;
    use chrono::Utc;

    #[test]
    fn test_time_until_next_run_later_today() {
        let schedule = ReminderTime::new(2, 0).unwrap().cron_schedule().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 1, 30, 0).unwrap();

        assert_eq!(
            time_until_next_run(&schedule, &now),
            Some(Duration::from_secs(30 * 60))
        );
    }

    #[test]
    fn test_time_until_next_run_tomorrow() {
        let schedule = ReminderTime::new(2, 0).unwrap().cron_schedule().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 2, 0, 0).unwrap();

        assert_eq!(
            time_until_next_run(&schedule, &now),
            Some(Duration::from_secs(24 * 60 * 60))
        );
    }
}
