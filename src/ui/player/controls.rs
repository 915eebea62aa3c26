// SPDX-License-Identifier: MPL-2.0
//! Transport bar drawn over the video.
//!
//! Provides play/pause, the progress slider, the `MM:SS / MM:SS` label and
//! the volume slider. Every element is tinted with the overlay opacity so a
//! fade dims the whole bar.

use crate::config::{MAX_VOLUME_PERCENT, MIN_VOLUME_PERCENT, SLIDER_MAX};
use crate::player::VolumePercent;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, slider, text, Row};
use iced::{alignment::Vertical, Element, Length};

/// Messages emitted by the transport bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Play/pause button.
    TogglePlayback,

    /// Progress slider is being dragged (visual feedback only, no seek).
    SeekPreview(u32),

    /// Progress slider released; seek to the previewed position.
    SeekCommit,

    /// Volume slider moved (percent).
    SetVolume(u8),
}

/// Everything the bar displays, copied out of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub playing: bool,

    /// Progress slider position in `0..=SLIDER_MAX`, the drag preview when
    /// one is in progress.
    pub slider_value: u32,

    /// False while the duration is still unknown; the slider is greyed out.
    pub seekable: bool,

    pub progress_label: String,
    pub volume: VolumePercent,

    /// Overlay opacity.
    pub alpha: f32,
}

/// Renders the transport bar.
pub fn view<'a>(state: &ViewState) -> Element<'a, Message> {
    let alpha = state.alpha;

    let play_pause_glyph = if state.playing { "⏸" } else { "▶" };
    let play_pause = button(
        container(text(play_pause_glyph).size(typography::TITLE_SM))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .on_press(Message::TogglePlayback)
    .width(Length::Fixed(sizing::BUTTON_HEIGHT))
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .style(styles::button::overlay(alpha));

    let progress_style = if state.seekable {
        styles::slider::overlay(alpha)
    } else {
        styles::slider::disabled(alpha)
    };
    // Preview while dragging, seek only on release.
    let progress = slider(0..=SLIDER_MAX, state.slider_value, Message::SeekPreview)
        .on_release(Message::SeekCommit)
        .width(Length::Fill)
        .style(progress_style);

    let time = text(state.progress_label.clone())
        .size(typography::CAPTION)
        .style(styles::overlay::label(alpha));

    let volume_icon = text(volume_glyph(state.volume))
        .size(typography::BODY)
        .style(styles::overlay::label(alpha));
    let volume = slider(
        MIN_VOLUME_PERCENT..=MAX_VOLUME_PERCENT,
        state.volume.value(),
        Message::SetVolume,
    )
    .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH))
    .style(styles::slider::overlay(alpha));

    let bar = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(play_pause)
        .push(progress)
        .push(time)
        .push(volume_icon)
        .push(volume);

    container(bar)
        .width(Length::Fill)
        .padding([spacing::XS, spacing::MD])
        .style(styles::overlay::controls_container(alpha))
        .into()
}

fn volume_glyph(volume: VolumePercent) -> &'static str {
    if volume.is_muted() {
        "🔇"
    } else if volume.is_max() {
        "🔊"
    } else {
        "🔉"
    }
}
