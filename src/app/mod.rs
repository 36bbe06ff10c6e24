// SPDX-License-Identifier: MPL-2.0
//! Demo application: one lens viewer with a settings sidebar.
//!
//! The `App` struct owns the viewer component, turns its effects into tasks
//! (exports run on a blocking worker, then go through a save dialog) and
//! reports outcomes in a status line.

mod message;

pub use message::{Flags, Message};

use crate::config::{self, Config, LENS_SIZE_SLIDER_STEP, MAX_LENS_SIZE_PX, MIN_LENS_SIZE_PX};
use crate::config::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL, WHEEL_ZOOM_STEP};
use crate::domain::lens::{ExportFormat, LensShape};
use crate::error::Error;
use crate::lens::ExportJob;
use crate::media::export::default_filename;
use crate::media::image::{TEST_PATTERN_HEIGHT, TEST_PATTERN_WIDTH};
use crate::media::{load_image, test_pattern, ImageResource};
use crate::ui::viewer::{self, Effect};
use iced::widget::{button, column, container, radio, row, slider, text};
use iced::{window, Element, Length, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

const SIDEBAR_WIDTH: f32 = 240.0;
const SAVE_DIALOG_TITLE: &str = "Save Zoomed Image";

/// Root application state.
pub struct App {
    viewer: viewer::State,
    status: String,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("viewer_has_image", &self.viewer.has_image())
            .field("status", &self.status)
            .finish()
    }
}

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .run()
}

/// Merges command-line overrides into the file configuration.
fn apply_flag_overrides(mut config: Config, flags: &Flags) -> Config {
    if flags.lens_size.is_some() {
        config.lens.lens_size = flags.lens_size;
    }
    if flags.zoom.is_some() {
        config.lens.zoom_level = flags.zoom;
    }
    if flags.shape.is_some() {
        config.lens.shape.clone_from(&flags.shape);
    }
    if flags.format.is_some() {
        config.export.format.clone_from(&flags.format);
    }
    config
}

fn load_config(flags: &Flags) -> (Config, Option<String>) {
    match &flags.config_path {
        Some(path) => match config::load_from_path(path) {
            Ok(config) => (config, None),
            Err(err) => {
                log::warn!("could not load {}: {err}", path.display());
                (Config::default(), Some(format!("Settings ignored: {err}")))
            }
        },
        None => {
            let (config, warning) = config::load();
            (
                config,
                warning.map(|_| "Settings file could not be read, using defaults".to_string()),
            )
        }
    }
}

fn export_task(job: ExportJob) -> Task<Message> {
    Task::perform(export_and_save(job), Message::ExportFinished)
}

/// Encodes on a blocking worker, then asks where to save the file.
async fn export_and_save(job: ExportJob) -> Result<Option<PathBuf>, Error> {
    let file_name = default_filename(job.format());
    let exported = tokio::task::spawn_blocking(move || job.run())
        .await
        .map_err(|e| Error::ExportFailed(e.to_string()))??;

    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title(SAVE_DIALOG_TITLE)
        .set_file_name(&file_name)
        .save_file()
        .await
    else {
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    exported.save_to_file(&path)?;
    Ok(Some(path))
}

fn load_image_task(path: PathBuf) -> Task<Message> {
    Task::perform(load_image_blocking(path), Message::ImageLoaded)
}

async fn load_image_blocking(path: PathBuf) -> Result<ImageResource, Error> {
    tokio::task::spawn_blocking(move || load_image(path))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}

impl App {
    /// Initializes application state and optionally kicks off asynchronous image
    /// loading based on `Flags` received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, warning) = load_config(&flags);
        let lens_config = apply_flag_overrides(config, &flags).lens_config();
        log::info!("starting with {lens_config:?}");

        let mut app = App {
            viewer: viewer::State::new(lens_config),
            status: warning.unwrap_or_default(),
        };

        let task = match flags.file_path {
            Some(path) => {
                app.status = format!("Loading {}...", path.display());
                load_image_task(path)
            }
            None => {
                app.show_test_pattern();
                Task::none()
            }
        };
        (app, task)
    }

    fn title(&self) -> String {
        "Zoom Lens".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn show_test_pattern(&mut self) {
        self.viewer
            .load_image(test_pattern(TEST_PATTERN_WIDTH, TEST_PATTERN_HEIGHT));
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(msg) => match self.viewer.handle(msg) {
                Effect::None => Task::none(),
                Effect::Export(job) => {
                    self.status = "Exporting...".to_string();
                    export_task(job)
                }
                Effect::ExportBusy => {
                    self.status = "An export is already running".to_string();
                    Task::none()
                }
                Effect::Error(err) => {
                    self.status = err.to_string();
                    Task::none()
                }
            },
            Message::ImageLoaded(Ok(image)) => {
                self.status = format!("{}x{}", image.width(), image.height());
                self.viewer.load_image(image);
                Task::none()
            }
            Message::ImageLoaded(Err(err)) => {
                log::error!("image load failed: {err}");
                self.status = format!("{err}; showing test pattern");
                self.show_test_pattern();
                Task::none()
            }
            Message::UseTestPattern => {
                self.show_test_pattern();
                self.status.clear();
                Task::none()
            }
            Message::ExportFinished(result) => {
                self.viewer.finish_export();
                self.status = match result {
                    Ok(Some(path)) => format!("Saved {}", path.display()),
                    Ok(None) => "Export cancelled".to_string(),
                    Err(err) => err.to_string(),
                };
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let sidebar = container(self.sidebar())
            .width(Length::Fixed(SIDEBAR_WIDTH))
            .height(Length::Fill)
            .padding(16);

        row![sidebar, self.viewer.view().map(Message::Viewer)]
            .height(Length::Fill)
            .into()
    }

    fn sidebar(&self) -> Element<'_, Message> {
        let session = self.viewer.session();
        let zoom = session.zoom();
        let config = session.config();

        let lens_size = slider(
            MIN_LENS_SIZE_PX as f32..=MAX_LENS_SIZE_PX as f32,
            zoom.lens_size() as f32,
            |value| {
                // Slider values stay within the lens size bounds.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let px = value.round() as u32;
                Message::Viewer(viewer::Message::SetLensSize(px))
            },
        )
        .step(LENS_SIZE_SLIDER_STEP as f32);

        let zoom_level = slider(MIN_ZOOM_LEVEL..=MAX_ZOOM_LEVEL, zoom.level(), |value| {
            Message::Viewer(viewer::Message::SetZoom(value))
        })
        .step(WHEEL_ZOOM_STEP);

        let shapes = LensShape::all().iter().fold(column![].spacing(4), |col, shape| {
            col.push(radio(
                shape.as_str(),
                *shape,
                Some(zoom.shape()),
                |shape| Message::Viewer(viewer::Message::SetShape(shape)),
            ))
        });

        let formats = ExportFormat::all()
            .iter()
            .fold(column![].spacing(4), |col, format| {
                col.push(radio(
                    format.extension(),
                    *format,
                    Some(config.format),
                    |format| Message::Viewer(viewer::Message::SetFormat(format)),
                ))
            });

        column![
            text(format!("Lens size: {} px", zoom.lens_size())),
            lens_size,
            text(format!("Zoom: {:.1}x", zoom.level())),
            zoom_level,
            text("Shape"),
            shapes,
            text("Download format"),
            formats,
            button("Test pattern").on_press(Message::UseTestPattern),
            text("Hover to magnify, scroll to zoom, right-click to save.").size(12),
            text(self.status.as_str()).size(12),
        ]
        .spacing(12)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn flags_override_file_values() {
        let mut file = Config::default();
        file.lens.lens_size = Some(100);
        file.export.format = Some("png".to_string());

        let flags = Flags {
            lens_size: Some(250),
            shape: Some("square".to_string()),
            ..Flags::default()
        };
        let lens = apply_flag_overrides(file, &flags).lens_config();

        assert_eq!(lens.lens_size.value(), 250);
        assert_eq!(lens.shape, LensShape::Square);
        assert_eq!(lens.format, ExportFormat::Png);
        assert_abs_diff_eq!(lens.zoom_level.value(), 2.0);
    }

    #[test]
    fn missing_config_path_reports_warning() {
        let flags = Flags {
            config_path: Some(PathBuf::from("/nonexistent/zoom-lens/settings.toml")),
            ..Flags::default()
        };
        let (config, warning) = load_config(&flags);
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn new_without_file_shows_test_pattern() {
        let (app, _task) = App::new(Flags {
            config_path: Some(PathBuf::from("/nonexistent/zoom-lens/settings.toml")),
            ..Flags::default()
        });
        let image = app.viewer.session().image().expect("test pattern");
        assert_eq!(
            (image.width(), image.height()),
            (TEST_PATTERN_WIDTH, TEST_PATTERN_HEIGHT)
        );
    }
}
