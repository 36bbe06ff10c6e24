// SPDX-License-Identifier: MPL-2.0
//! Canvas program drawing the image with the lens on top and translating
//! mouse input into viewer messages.

use super::viewer::Message;
use crate::config::LENS_OUTLINE_WIDTH;
use crate::domain::lens::{DisplayGeometry, DisplayPoint, LensShape};
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke};
use iced::widget::image::{FilterMethod, Handle};
use iced::widget::Action;
use iced::{Color, Event, Point, Rectangle, Renderer, Size, Theme};

/// The lens as the canvas should draw it.
#[derive(Debug, Clone, Copy)]
pub struct LensOverlay<'a> {
    pub handle: &'a Handle,
    /// Pointer position relative to the displayed image.
    pub pointer: DisplayPoint,
    pub size: u32,
    pub shape: LensShape,
}

/// Canvas program for one lens viewer.
pub struct LensCanvas<'a> {
    pub base: Option<&'a Handle>,
    pub natural_size: (u32, u32),
    pub geometry: Option<DisplayGeometry>,
    pub hovering: bool,
    pub lens: Option<LensOverlay<'a>>,
    pub base_cache: &'a Cache,
}

impl LensCanvas<'_> {
    fn image_rect(&self, bounds: Size) -> Option<Rectangle> {
        contain_rect(self.natural_size.0, self.natural_size.1, bounds)
    }

    fn fitted_geometry(&self, bounds: Size) -> Option<DisplayGeometry> {
        let rect = self.image_rect(bounds)?;
        DisplayGeometry::new(
            rect.width,
            rect.height,
            self.natural_size.0,
            self.natural_size.1,
        )
    }

    /// Maps a canvas event to a viewer message and whether to capture it.
    ///
    /// When the fitted layout differs from the one the viewer knows, the
    /// layout change is sent first with the input message chained behind it.
    fn translate(
        &self,
        event: &Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<(Message, bool)> {
        let input = self.input_message(event, bounds, cursor);
        let geometry = self.fitted_geometry(bounds.size());
        if geometry == self.geometry {
            return input;
        }
        let capture = input.as_ref().is_some_and(|(_, capture)| *capture);
        let message = Message::LayoutChanged {
            geometry,
            then: input.map(|(message, _)| Box::new(message)),
        };
        Some((message, capture))
    }

    fn input_message(
        &self,
        event: &Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<(Message, bool)> {
        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let inside = cursor
                    .position_in(bounds)
                    .zip(self.image_rect(bounds.size()))
                    .map(|(position, rect)| {
                        DisplayPoint::new(position.x - rect.x, position.y - rect.y)
                    });
                match inside {
                    Some(point) => Some((Message::PointerMoved(point), false)),
                    None if self.hovering => Some((Message::PointerLeft, false)),
                    None => None,
                }
            }
            Event::Mouse(mouse::Event::CursorLeft) if self.hovering => {
                Some((Message::PointerLeft, false))
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) if self.hovering => {
                cursor.position_in(bounds)?;
                Some((Message::Wheel(scroll_steps(delta)), true))
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => {
                cursor.position_in(bounds)?;
                Some((Message::ExportRequested, true))
            }
            _ => None,
        }
    }
}

impl canvas::Program<Message> for LensCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Option<Action<Message>> {
        let (message, capture) = self.translate(event, bounds, cursor)?;
        let action = Action::publish(message);
        Some(if capture { action.and_capture() } else { action })
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let rect = self.image_rect(bounds.size());

        let base = self.base_cache.draw(renderer, bounds.size(), |frame| {
            if let (Some(handle), Some(rect)) = (self.base, rect) {
                frame.draw_image(rect, canvas::Image::new(handle.clone()));
            }
        });

        let mut overlay = Frame::new(renderer, bounds.size());
        if let (Some(lens), Some(rect)) = (self.lens, rect) {
            draw_lens(&mut overlay, lens, rect);
        }

        vec![base, overlay.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        _bounds: Rectangle,
        _cursor: Cursor,
    ) -> mouse::Interaction {
        if self.hovering {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn draw_lens(frame: &mut Frame, lens: LensOverlay<'_>, image_rect: Rectangle) {
    let side = lens.size as f32;
    let center = Point::new(image_rect.x + lens.pointer.x, image_rect.y + lens.pointer.y);
    let top_left = Point::new(center.x - side / 2.0, center.y - side / 2.0);
    let area = Rectangle::new(top_left, Size::new(side, side));

    // The patch is already clipped through its alpha channel.
    frame.draw_image(
        area,
        canvas::Image::new(lens.handle.clone()).filter_method(FilterMethod::Nearest),
    );

    let outline = match lens.shape {
        LensShape::Circle => Path::circle(center, side / 2.0),
        LensShape::Square => Path::rectangle(top_left, area.size()),
    };
    frame.stroke(
        &outline,
        Stroke::default()
            .with_width(LENS_OUTLINE_WIDTH)
            .with_color(Color::WHITE),
    );
}

/// Where an image of the given natural size lands inside `bounds` with
/// `ContentFit::Contain`: as large as possible, aspect ratio kept, centered.
///
/// Returns `None` for an empty image or empty bounds.
#[must_use]
pub fn contain_rect(natural_width: u32, natural_height: u32, bounds: Size) -> Option<Rectangle> {
    if natural_width == 0 || natural_height == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }

    let img_aspect = natural_width as f32 / natural_height as f32;
    let bounds_aspect = bounds.width / bounds.height;

    let (width, height) = if img_aspect > bounds_aspect {
        // Image is wider - fit to width
        (bounds.width, bounds.width / img_aspect)
    } else {
        // Image is taller - fit to height
        (bounds.height * img_aspect, bounds.height)
    };

    Some(Rectangle::new(
        Point::new((bounds.width - width) / 2.0, (bounds.height - height) / 2.0),
        Size::new(width, height),
    ))
}

/// Converts a wheel delta to notches; pixel deltas from touchpads are scaled.
fn scroll_steps(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / crate::config::PIXELS_PER_WHEEL_NOTCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn wide_image_fits_to_width() {
        let rect = contain_rect(800, 400, Size::new(400.0, 400.0)).expect("rect");
        assert_abs_diff_eq!(rect.width, 400.0);
        assert_abs_diff_eq!(rect.height, 200.0);
        assert_abs_diff_eq!(rect.x, 0.0);
        assert_abs_diff_eq!(rect.y, 100.0);
    }

    #[test]
    fn tall_image_fits_to_height() {
        let rect = contain_rect(300, 600, Size::new(400.0, 300.0)).expect("rect");
        assert_abs_diff_eq!(rect.width, 150.0);
        assert_abs_diff_eq!(rect.height, 300.0);
        assert_abs_diff_eq!(rect.x, 125.0);
        assert_abs_diff_eq!(rect.y, 0.0);
    }

    #[test]
    fn degenerate_inputs_have_no_rect() {
        assert!(contain_rect(0, 10, Size::new(100.0, 100.0)).is_none());
        assert!(contain_rect(10, 10, Size::new(0.0, 100.0)).is_none());
    }

    fn canvas(cache: &Cache, geometry: Option<DisplayGeometry>) -> LensCanvas<'_> {
        LensCanvas {
            base: None,
            natural_size: (800, 400),
            geometry,
            hovering: false,
            lens: None,
            base_cache: cache,
        }
    }

    fn bounds() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(400.0, 400.0))
    }

    #[test]
    fn first_move_after_resize_is_chained_behind_layout() {
        let cache = Cache::new();
        let canvas = canvas(&cache, None);
        let event = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(100.0, 150.0),
        });

        let (message, capture) = canvas
            .translate(&event, bounds(), Cursor::Available(Point::new(100.0, 150.0)))
            .expect("message");

        assert!(!capture);
        match message {
            Message::LayoutChanged { geometry, then } => {
                assert_eq!(geometry, DisplayGeometry::new(400.0, 200.0, 800, 400));
                match then.as_deref() {
                    Some(Message::PointerMoved(point)) => {
                        assert_eq!(*point, DisplayPoint::new(100.0, 50.0));
                    }
                    other => panic!("expected chained pointer move, got {other:?}"),
                }
            }
            other => panic!("expected layout change, got {other:?}"),
        }
    }

    #[test]
    fn right_click_during_resize_is_kept_and_captured() {
        let cache = Cache::new();
        let canvas = canvas(&cache, DisplayGeometry::new(10.0, 5.0, 800, 400));
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right));

        let (message, capture) = canvas
            .translate(&event, bounds(), Cursor::Available(Point::new(200.0, 200.0)))
            .expect("message");

        assert!(capture);
        assert!(matches!(
            message,
            Message::LayoutChanged { then: Some(ref then), .. }
                if matches!(**then, Message::ExportRequested)
        ));
    }

    #[test]
    fn known_layout_passes_input_through() {
        let cache = Cache::new();
        let canvas = canvas(&cache, DisplayGeometry::new(400.0, 200.0, 800, 400));
        let event = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(100.0, 150.0),
        });

        let translated =
            canvas.translate(&event, bounds(), Cursor::Available(Point::new(100.0, 150.0)));
        assert!(matches!(translated, Some((Message::PointerMoved(_), false))));
    }

    #[test]
    fn scroll_steps_converts_pixels_to_notches() {
        assert_abs_diff_eq!(
            scroll_steps(&mouse::ScrollDelta::Lines { x: 0.0, y: 2.0 }),
            2.0
        );
        assert_abs_diff_eq!(
            scroll_steps(&mouse::ScrollDelta::Pixels { x: 0.0, y: -240.0 }),
            -2.0
        );
    }
}
