use chrono::{NaiveDate, NaiveDateTime};
use focusflow_core::{BlockKind, WeeklySchedule};

pub struct CalendarEvent {
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
    pub description: String,
}

/// One event per work block. Breaks are left out of the calendar.
pub fn schedule_to_events(schedule: &WeeklySchedule) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for (day, blocks) in &schedule.schedule {
        for (i, b) in blocks.iter().enumerate() {
            if b.kind != BlockKind::Work {
                continue;
            }
            events.push(CalendarEvent {
                uid: event_uid(*day, i, &b.task_id),
                start: day.and_time(b.start),
                end: day.and_time(b.end()),
                summary: b.task_title.clone(),
                description: format!("TaskId: {}\nMinutes: {}\n", b.task_id, b.duration),
            });
        }
    }

    events
}

/// Stable per (day, slot, task) so re-imports update instead of duplicating.
fn event_uid(day: NaiveDate, slot: usize, task_id: &str) -> String {
    format!("focusflow-{}-{}-{}@focusflow", day.format("%Y%m%d"), slot, task_id)
}

/// Emit a minimal ICS calendar. Times are floating local times.
pub fn events_to_ics(events: &[CalendarEvent]) -> String {
    let mut s = String::new();
    s.push_str("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//FocusFlow//EN\n");

    for e in events {
        s.push_str("BEGIN:VEVENT\n");
        s.push_str(&format!("UID:{}\n", e.uid));
        s.push_str(&format!("DTSTART:{}\n", e.start.format("%Y%m%dT%H%M%S")));
        s.push_str(&format!("DTEND:{}\n", e.end.format("%Y%m%dT%H%M%S")));
        s.push_str(&format!("SUMMARY:{}\n", escape_ics(&e.summary)));
        s.push_str(&format!("DESCRIPTION:{}\n", escape_ics(&e.description)));
        s.push_str("END:VEVENT\n");
    }

    s.push_str("END:VCALENDAR\n");
    s
}

fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
