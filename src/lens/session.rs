// SPDX-License-Identifier: MPL-2.0
//! Lens session: the event dispatcher tying pointer, wheel, layout and export
//! gestures to the mapper, zoom state, renderer and compositor.
//!
//! A session owns all of its state; hosts create one per displayed image and
//! feed it [`Event`]s. Every call to [`LensSession::handle`] runs to
//! completion and returns a single [`Effect`] describing what the host must do
//! next.
//!
//! ```text
//!            move inside              move outside / leave / layout lost
//!   Idle ─────────────────▶ Hovering ─────────────────────────────────▶ Idle
//!                            │    ▲
//!                            └────┘ move inside, wheel, zoom, layout
//! ```

use crate::config::LensConfig;
use crate::domain::lens::{
    DisplayGeometry, DisplayPoint, ExportFormat, ImagePoint, PointerState,
};
use crate::error::{Error, Result};
use crate::lens::compositor::{self, LensPlacement};
use crate::lens::mapper::map_to_image_space;
use crate::lens::renderer::{render, LensFrame};
use crate::lens::zoom::ZoomState;
use crate::media::{ExportedImage, ImageResource};

/// Whether the lens is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// Pointer is away from the image; nothing is drawn.
    #[default]
    Idle,
    /// Pointer is over the image and the lens follows it.
    Hovering,
}

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer position relative to the displayed image's top-left corner.
    PointerMoved(DisplayPoint),
    /// Pointer left the image widget.
    PointerLeft,
    /// Wheel gesture in notches; positive values scroll up (zoom in).
    Wheel(f32),
    /// External zoom control set a new magnification.
    ZoomLevelChanged(f32),
    /// Displayed size changed. `None` while the image is not visible.
    LayoutChanged(Option<DisplayGeometry>),
    /// Download requested, optionally overriding the configured format.
    ExportRequested(Option<ExportFormat>),
}

/// What the host must do after an event.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Nothing visible changed.
    None,
    /// The lens frame changed and must be redrawn.
    Redraw,
    /// The lens must be removed from the screen.
    HideLens,
    /// Run this export job (possibly off the UI thread), then call
    /// [`LensSession::finish_export`].
    Export(ExportJob),
    /// An export is already in flight; the request was dropped.
    ExportBusy,
    /// The event could not be handled.
    Error(Error),
}

/// Owned snapshot of everything an export needs.
///
/// Taken in one step by the session, so the encode can run on a worker while
/// the user keeps moving the lens.
#[derive(Debug, Clone)]
pub struct ExportJob {
    base: ImageResource,
    frame: Option<LensFrame>,
    placement: LensPlacement,
    format: ExportFormat,
}

impl ExportJob {
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Returns true if the export will include a lens.
    #[must_use]
    pub fn has_lens(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub fn frame(&self) -> Option<&LensFrame> {
        self.frame.as_ref()
    }

    /// Composites and encodes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExportFailed`] if encoding fails.
    pub fn run(self) -> Result<ExportedImage> {
        compositor::export(
            &self.base,
            self.frame.as_ref(),
            self.placement,
            self.format,
        )
        .inspect(|exported| {
            log::info!(
                "exported {}x{} {} ({} bytes)",
                exported.width,
                exported.height,
                exported.format,
                exported.bytes.len()
            );
        })
        .inspect_err(|err| log::error!("export failed: {err}"))
    }
}

/// Per-image lens state machine.
#[derive(Debug, Clone, Default)]
pub struct LensSession {
    config: LensConfig,
    zoom: ZoomState,
    state: HoverState,
    pointer: PointerState,
    geometry: Option<DisplayGeometry>,
    image: Option<ImageResource>,
    frame: Option<LensFrame>,
    export_pending: bool,
}

impl LensSession {
    /// Creates an idle session without an image.
    #[must_use]
    pub fn new(config: LensConfig) -> Self {
        Self {
            config,
            zoom: config.zoom_state(),
            ..Self::default()
        }
    }

    /// Creates an idle session showing `image` at its natural size.
    #[must_use]
    pub fn with_image(config: LensConfig, image: ImageResource) -> Self {
        let mut session = Self::new(config);
        session.load_image(image);
        session
    }

    /// Replaces the image source.
    ///
    /// The lens is hidden and the layout reset to the natural size until the
    /// host reports the real one.
    pub fn load_image(&mut self, image: ImageResource) -> Effect {
        self.geometry = DisplayGeometry::unscaled(image.width(), image.height());
        if self.geometry.is_none() {
            log::warn!("loaded an empty image, lens disabled");
        }
        self.image = Some(image);
        self.frame = None;
        self.go_idle();
        Effect::Redraw
    }

    /// Applies a new configuration: zoom, size and shape are reset from it and
    /// the lens is hidden until the next pointer move.
    pub fn reconfigure(&mut self, config: LensConfig) -> Effect {
        log::debug!("reconfigure: {config:?}");
        self.config = config;
        self.zoom = config.zoom_state();
        self.frame = None;
        if self.go_idle() {
            Effect::HideLens
        } else {
            Effect::None
        }
    }

    /// Dispatches one host event.
    pub fn handle(&mut self, event: Event) -> Effect {
        match event {
            Event::PointerMoved(point) => self.on_pointer_moved(point),
            Event::PointerLeft => self.leave(),
            Event::Wheel(notches) => self.on_wheel(notches),
            Event::ZoomLevelChanged(level) => self.on_zoom_changed(level),
            Event::LayoutChanged(geometry) => self.on_layout_changed(geometry),
            Event::ExportRequested(format) => self.request_export(format),
        }
    }

    /// Marks the in-flight export as finished, allowing the next one.
    pub fn finish_export(&mut self) {
        self.export_pending = false;
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[must_use]
    pub fn geometry(&self) -> Option<DisplayGeometry> {
        self.geometry
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageResource> {
        self.image.as_ref()
    }

    /// The frame to draw, present only while hovering.
    #[must_use]
    pub fn visible_frame(&self) -> Option<&LensFrame> {
        match self.state {
            HoverState::Hovering => self.frame.as_ref(),
            HoverState::Idle => None,
        }
    }

    /// The most recent frame, kept after the pointer leaves so a later export
    /// still shows the last lens position.
    #[must_use]
    pub fn last_frame(&self) -> Option<&LensFrame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn is_export_pending(&self) -> bool {
        self.export_pending
    }

    fn on_pointer_moved(&mut self, point: DisplayPoint) -> Effect {
        self.pointer.display = point;
        let Some(geometry) = self.geometry else {
            return self.leave();
        };
        if !geometry.contains(point) {
            return self.leave();
        }

        self.pointer.is_inside = true;
        if self.state == HoverState::Idle {
            log::debug!("lens: idle -> hovering");
            self.state = HoverState::Hovering;
        }
        self.render_at(map_to_image_space(point, &geometry))
    }

    fn on_wheel(&mut self, notches: f32) -> Effect {
        if self.state == HoverState::Idle {
            return Effect::None;
        }
        let before = self.zoom.level();
        if self.zoom.apply_wheel_delta(notches) == before {
            return Effect::None;
        }
        log::debug!("wheel zoom: {before} -> {}", self.zoom.level());
        self.rerender_last()
    }

    fn on_zoom_changed(&mut self, level: f32) -> Effect {
        if !self.zoom.set_level(level) {
            return Effect::None;
        }
        // A hidden lens keeps its last frame; the new level shows on next hover.
        match self.state {
            HoverState::Hovering => self.rerender_last(),
            HoverState::Idle => Effect::None,
        }
    }

    fn on_layout_changed(&mut self, geometry: Option<DisplayGeometry>) -> Effect {
        self.geometry = geometry;
        if geometry.is_none() {
            log::debug!("layout lost, lens hidden");
            return self.leave();
        }
        match self.state {
            HoverState::Hovering => self.on_pointer_moved(self.pointer.display),
            HoverState::Idle => Effect::None,
        }
    }

    fn request_export(&mut self, format: Option<ExportFormat>) -> Effect {
        if self.export_pending {
            log::debug!("export already in flight");
            return Effect::ExportBusy;
        }
        let Some(base) = self.image.clone() else {
            return Effect::Error(Error::ResourceUnavailable);
        };

        let center = self
            .frame
            .as_ref()
            .map(LensFrame::center)
            .unwrap_or_default();
        let placement = match self.geometry {
            Some(geometry) => LensPlacement::for_geometry(center, &geometry),
            None => LensPlacement::unscaled(center),
        };

        self.export_pending = true;
        Effect::Export(ExportJob {
            base,
            frame: self.frame.clone(),
            placement,
            format: format.unwrap_or(self.config.format),
        })
    }

    fn render_at(&mut self, center: ImagePoint) -> Effect {
        let Some(image) = self.image.as_ref() else {
            self.go_idle();
            return Effect::Error(Error::ResourceUnavailable);
        };
        match render(image, center, &self.zoom) {
            Ok(frame) => {
                self.frame = Some(frame);
                Effect::Redraw
            }
            Err(err) => {
                self.frame = None;
                self.go_idle();
                Effect::Error(err)
            }
        }
    }

    fn rerender_last(&mut self) -> Effect {
        match self.frame.as_ref().map(LensFrame::center) {
            Some(center) => self.render_at(center),
            None => Effect::None,
        }
    }

    fn leave(&mut self) -> Effect {
        if self.go_idle() {
            Effect::HideLens
        } else {
            Effect::None
        }
    }

    /// Returns true if the session was hovering.
    fn go_idle(&mut self) -> bool {
        self.pointer.is_inside = false;
        let was_hovering = self.state == HoverState::Hovering;
        if was_hovering {
            log::debug!("lens: hovering -> idle");
        }
        self.state = HoverState::Idle;
        was_hovering
    }
}
