// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canned posts and events shown when the Graph API is unavailable.

use super::content::{ContentItem, ContentKind, Event, EventCover, Post};
use crate::time_utils::{format_utc_rfc3339, next_weekday_at};
use chrono::{DateTime, Duration, Utc, Weekday};
use serde_json::Map;

const PAGE_URL: &str = "https://www.facebook.com/KingsHeadCacklebury";

/// Fallback items for `kind`, truncated to `limit`.
///
/// Dates are computed from `now` so the placeholders never look stale.
pub fn fallback_items(kind: ContentKind, limit: u32, now: DateTime<Utc>) -> Vec<ContentItem> {
    let items: Vec<ContentItem> = match kind {
        ContentKind::Posts => fallback_posts(now).into_iter().map(ContentItem::Post).collect(),
        ContentKind::Events => fallback_events(now)
            .into_iter()
            .map(ContentItem::Event)
            .collect(),
    };
    items.into_iter().take(limit as usize).collect()
}

fn post(id: &str, message: &str, created: DateTime<Utc>, picture: &str) -> Post {
    Post {
        id: id.to_string(),
        message: Some(message.to_string()),
        created_time: Some(format_utc_rfc3339(created)),
        full_picture: Some(picture.to_string()),
        permalink_url: Some(PAGE_URL.to_string()),
        extra: Map::new(),
    }
}

fn fallback_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        post(
            "fallback1",
            "Join us this Sunday for our famous roast dinner! Seating available from 12pm to 4pm. \
             Book your table now by calling 01323 440447.",
            now,
            "/roast_lunch.jpg",
        ),
        post(
            "fallback2",
            "Test your knowledge at our weekly Pub Quiz! Every Sunday evening from 7pm. \
             Great prizes to be won!",
            now - Duration::days(1),
            "/quiz.jpg",
        ),
        post(
            "fallback3",
            "We're proud to serve a wide selection of Harvey's ales, brewed locally in Lewes. \
             Come and enjoy a perfect pint in our cozy pub atmosphere!",
            now - Duration::days(2),
            "/harveys_pumps.jpg",
        ),
    ]
}

fn event(
    id: &str,
    name: &str,
    description: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    cover: &str,
) -> Event {
    Event {
        id: id.to_string(),
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        start_time: Some(format_utc_rfc3339(start)),
        end_time: Some(format_utc_rfc3339(end)),
        cover: Some(EventCover {
            source: cover.to_string(),
            extra: Map::new(),
        }),
        extra: Map::new(),
    }
}

fn fallback_events(now: DateTime<Utc>) -> Vec<Event> {
    let sunday = |h| next_weekday_at(now, Weekday::Sun, h, 0);
    let saturday = |h| next_weekday_at(now, Weekday::Sat, h, 0);

    vec![
        event(
            "event1",
            "Sunday Roast Lunch",
            "Join us for our legendary Sunday roast lunch with all the trimmings! Choose from \
             succulent roast beef, tender pork, mouthwatering chicken, or our delicious \
             vegetarian option.",
            sunday(12),
            sunday(16),
            "/roast_lunch.jpg",
        ),
        event(
            "event2",
            "Sunday Evening Pub Quiz",
            "Test your knowledge and win great prizes at our weekly pub quiz!",
            sunday(19),
            sunday(21),
            "/quiz.jpg",
        ),
        event(
            "event3",
            "Live Music in the Garden",
            "Enjoy live music in our pub garden, weather permitting. Check back for details \
             of performers!",
            saturday(18),
            saturday(22),
            "/live_music.jpg",
        ),
    ]
}
