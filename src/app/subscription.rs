// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the gallery.
//!
//! Window events feed the fullscreen mirror and the grid layout, Escape
//! leaves fullscreen, and every thumbnail with a live media element
//! contributes its own media event stream.

use super::{App, Message};
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Spinner and placeholder pulse frame interval.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

pub fn create(app: &App) -> Subscription<Message> {
    let mut subscriptions = vec![create_event_subscription()];

    if app.is_animating() {
        subscriptions.push(time::every(TICK_INTERVAL).map(|_| Message::Tick));
    }

    subscriptions.extend(app.thumbnails.iter().enumerate().map(|(index, thumbnail)| {
        thumbnail
            .subscription()
            .with(index)
            .map(|(index, message)| Message::Thumbnail(index, message))
    }));

    Subscription::batch(subscriptions)
}

fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { size, .. }) => {
            Some(Message::WindowOpened(window_id, size))
        }
        event::Event::Window(window::Event::Resized(size)) => {
            Some(Message::WindowResized(window_id, size))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) if matches!(status, event::Status::Ignored) => Some(Message::EscapePressed),
        _ => None,
    })
}
