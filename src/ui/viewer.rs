// SPDX-License-Identifier: MPL-2.0
//! Lens viewer component: wraps a [`LensSession`] and the iced image handles
//! needed to draw it.

use super::lens_canvas::{LensCanvas, LensOverlay};
use crate::config::LensConfig;
use crate::domain::lens::{
    DisplayGeometry, DisplayPoint, ExportFormat, LensShape, LensSize, ZoomLevel,
};
use crate::error::Error;
use crate::lens::{Effect as SessionEffect, Event, ExportJob, HoverState, LensSession};
use crate::media::ImageResource;
use iced::widget::canvas::{Cache, Canvas};
use iced::widget::image::Handle;
use iced::{Element, Length};
use std::fmt;

/// Viewer component state.
#[derive(Default)]
pub struct State {
    session: LensSession,
    base_handle: Option<Handle>,
    lens_handle: Option<Handle>,
    base_cache: Cache,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("session", &self.session)
            .field("has_lens_handle", &self.lens_handle.is_some())
            .finish_non_exhaustive()
    }
}

/// Messages for the viewer component.
#[derive(Debug, Clone)]
pub enum Message {
    PointerMoved(DisplayPoint),
    PointerLeft,
    /// Wheel gesture in notches.
    Wheel(f32),
    /// The fitted layout changed; `then` is the input that revealed it.
    LayoutChanged {
        geometry: Option<DisplayGeometry>,
        then: Option<Box<Message>>,
    },
    /// Right click on the image.
    ExportRequested,
    SetZoom(f32),
    SetLensSize(u32),
    SetShape(LensShape),
    SetFormat(ExportFormat),
}

/// Effects the application must act on.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Run the job off the UI thread, then call [`State::finish_export`].
    Export(ExportJob),
    /// An export is still running.
    ExportBusy,
    Error(Error),
}

impl State {
    #[must_use]
    pub fn new(config: LensConfig) -> Self {
        Self {
            session: LensSession::new(config),
            ..Self::default()
        }
    }

    /// Shows a new image, hiding the lens until the pointer moves.
    pub fn load_image(&mut self, image: ImageResource) {
        self.base_handle = Some(Handle::from_rgba(
            image.width(),
            image.height(),
            image.rgba_bytes().to_vec(),
        ));
        self.base_cache.clear();
        let effect = self.session.load_image(image);
        self.apply(effect);
    }

    /// Handle a viewer message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        let effect = match msg {
            Message::PointerMoved(point) => self.session.handle(Event::PointerMoved(point)),
            Message::PointerLeft => self.session.handle(Event::PointerLeft),
            Message::Wheel(notches) => self.session.handle(Event::Wheel(notches)),
            Message::LayoutChanged { geometry, then } => {
                let effect = self.session.handle(Event::LayoutChanged(geometry));
                let layout = self.apply(effect);
                return match then {
                    Some(message) => self.handle(*message),
                    None => layout,
                };
            }
            Message::ExportRequested => self.session.handle(Event::ExportRequested(None)),
            Message::SetZoom(level) => self.session.handle(Event::ZoomLevelChanged(level)),
            Message::SetLensSize(px) => {
                let config = LensConfig {
                    lens_size: LensSize::new(i64::from(px)),
                    ..self.current_config()
                };
                self.session.reconfigure(config)
            }
            Message::SetShape(shape) => {
                let config = LensConfig {
                    shape,
                    ..self.current_config()
                };
                self.session.reconfigure(config)
            }
            Message::SetFormat(format) => {
                let config = LensConfig {
                    format,
                    ..self.current_config()
                };
                self.session.reconfigure(config)
            }
        };
        self.apply(effect)
    }

    /// Allows the next export once the previous one is done.
    pub fn finish_export(&mut self) {
        self.session.finish_export();
    }

    #[must_use]
    pub fn session(&self) -> &LensSession {
        &self.session
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.session.image().is_some()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let natural_size = self
            .session
            .image()
            .map_or((0, 0), |image| (image.width(), image.height()));
        let zoom = self.session.zoom();
        let lens = self
            .lens_handle
            .as_ref()
            .filter(|_| self.session.state() == HoverState::Hovering)
            .map(|handle| LensOverlay {
                handle,
                pointer: self.session.pointer().display,
                size: zoom.lens_size(),
                shape: zoom.shape(),
            });

        Canvas::new(LensCanvas {
            base: self.base_handle.as_ref(),
            natural_size,
            geometry: self.session.geometry(),
            hovering: self.session.state() == HoverState::Hovering,
            lens,
            base_cache: &self.base_cache,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Configuration reflecting the live zoom level, so a settings change does
    /// not undo wheel zooming.
    fn current_config(&self) -> LensConfig {
        LensConfig {
            zoom_level: ZoomLevel::new(self.session.zoom().level()),
            ..*self.session.config()
        }
    }

    fn apply(&mut self, effect: SessionEffect) -> Effect {
        match effect {
            SessionEffect::None => Effect::None,
            SessionEffect::Redraw => {
                self.lens_handle = self.session.visible_frame().map(|frame| {
                    let image = frame.image();
                    Handle::from_rgba(image.width(), image.height(), image.as_raw().clone())
                });
                Effect::None
            }
            SessionEffect::HideLens => {
                self.lens_handle = None;
                Effect::None
            }
            SessionEffect::Export(job) => Effect::Export(job),
            SessionEffect::ExportBusy => Effect::ExportBusy,
            SessionEffect::Error(err) => {
                self.lens_handle = None;
                Effect::Error(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, gradient_resource};

    fn viewer() -> State {
        let mut state = State::new(LensConfig::default());
        state.load_image(gradient_resource(200, 100));
        state
    }

    #[test]
    fn pointer_move_creates_lens_handle() {
        let mut state = viewer();
        state.handle(Message::PointerMoved(DisplayPoint::new(50.0, 50.0)));
        assert!(state.lens_handle.is_some());

        state.handle(Message::PointerLeft);
        assert!(state.lens_handle.is_none());
    }

    #[test]
    fn settings_change_keeps_wheel_zoom() {
        let mut state = viewer();
        state.handle(Message::PointerMoved(DisplayPoint::new(50.0, 50.0)));
        state.handle(Message::Wheel(10.0));
        assert_abs_diff_eq!(state.session().zoom().level(), 3.0);

        state.handle(Message::SetShape(LensShape::Square));
        assert_abs_diff_eq!(state.session().zoom().level(), 3.0);
        assert_eq!(state.session().zoom().shape(), LensShape::Square);
        assert!(state.lens_handle.is_none());
    }

    #[test]
    fn layout_change_replays_chained_pointer_move() {
        let mut state = viewer();
        state.handle(Message::LayoutChanged {
            geometry: DisplayGeometry::new(100.0, 50.0, 200, 100),
            then: Some(Box::new(Message::PointerMoved(DisplayPoint::new(25.0, 25.0)))),
        });

        assert_eq!(state.session().state(), HoverState::Hovering);
        assert!(state.lens_handle.is_some());
        assert_eq!(
            state.session().visible_frame().expect("frame").center(),
            crate::domain::lens::ImagePoint::new(50.0, 50.0)
        );
    }

    #[test]
    fn layout_change_replays_chained_export() {
        let mut state = viewer();
        let effect = state.handle(Message::LayoutChanged {
            geometry: DisplayGeometry::new(100.0, 50.0, 200, 100),
            then: Some(Box::new(Message::ExportRequested)),
        });
        assert!(matches!(effect, Effect::Export(_)));
    }

    #[test]
    fn lens_size_is_clamped() {
        let mut state = viewer();
        state.handle(Message::SetLensSize(1_000));
        assert_eq!(state.session().zoom().lens_size(), 300);
    }

    #[test]
    fn export_is_serialized() {
        let mut state = viewer();
        assert!(matches!(
            state.handle(Message::ExportRequested),
            Effect::Export(_)
        ));
        assert!(matches!(
            state.handle(Message::ExportRequested),
            Effect::ExportBusy
        ));
        state.finish_export();
        assert!(matches!(
            state.handle(Message::SetFormat(ExportFormat::Png)),
            Effect::None
        ));
        match state.handle(Message::ExportRequested) {
            Effect::Export(job) => assert_eq!(job.format(), ExportFormat::Png),
            other => panic!("expected export, got {other:?}"),
        }
    }
}
