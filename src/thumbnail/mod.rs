// SPDX-License-Identifier: MPL-2.0
//! Lazily-loaded video thumbnail.
//!
//! A thumbnail shows a poster (or a placeholder panel) until the user clicks
//! it. Only then does it create its media element and start playback. The
//! poster itself is fetched only once the thumbnail has come near the
//! viewport.
//!
//! - [`props`]: what a thumbnail is built from
//! - [`state`]: flags and the play/pause state machine
//! - [`visibility`]: intersection observer and the one-way in-view latch
//! - [`layout`]: chrome size classes and the narrow-viewport check
//! - [`component`]: the driver, generic over media and fullscreen surfaces
//! - [`view`]: rendering

pub mod component;
pub mod incidents;
pub mod layout;
pub mod poster;
pub mod props;
pub mod state;
pub mod view;
pub mod visibility;

pub use component::{Message, Mount, Thumbnail};
pub use incidents::{Incident, IncidentKind, IncidentLog};
pub use layout::{LayoutOptions, SizeClass, ViewportPolicy, ViewportProbe};
pub use props::{AspectVariant, StyleClasses, ThumbnailProps};
pub use state::{Phase, State};
pub use view::ViewContext;
pub use visibility::{IntersectionObserver, ObservationHandle, ObserverOptions, ThumbnailKey};
