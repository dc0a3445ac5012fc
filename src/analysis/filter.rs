//! Shot Event Filtering
//!
//! Removes overlapping shot candidates and enforces a minimum spacing
//! between consecutive events. When two events are closer than the minimum
//! gap, the higher-confidence one survives.

use super::classifier::ShotEvent;

/// Filter accepted shot events into a non-overlapping, well-spaced list
///
/// Events are sorted by start time; each is accepted only when it starts at
/// least `min_gap` seconds after the previously accepted event ends. On
/// overlap the higher-confidence event replaces the other in place.
pub fn filter_shot_events(mut events: Vec<ShotEvent>, min_gap: f64) -> Vec<ShotEvent> {
    if events.is_empty() {
        return events;
    }

    events.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut filtered: Vec<ShotEvent> = Vec::with_capacity(events.len());
    for event in events {
        match filtered.last() {
            Some(last) if event.start_time - last.end_time < min_gap => {
                if event.confidence > last.confidence {
                    *filtered.last_mut().unwrap() = event;
                }
            }
            _ => filtered.push(event),
        }
    }

    filtered
}
