//! Coloring images and persisted control records.

use std::path::Path;

use super::command::UiRequest;
use super::Session;
use crate::control::ControlState;
use crate::error::GasketError;
use crate::renderer::ComputeBackend;

impl<B: ComputeBackend> Session<B> {
    /// Use `image` as the coloring texture and turn texturing on.
    ///
    /// The next tick asks the host whether to neutralize shading so the
    /// texture's colors come through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::TextureLoad`] if the image does not fit the
    /// device's texture limit. Texturing and the record are untouched.
    pub fn accept_texture(
        &mut self,
        image: &image::RgbaImage,
    ) -> Result<(), GasketError> {
        let (width, height) = image.dimensions();
        self.dispatcher.set_coloring_image(image)?;
        self.texture_loaded = true;
        self.control.attach_texture(width, height);
        self.coloring_prompt = true;
        self.requests.push(UiRequest::RefreshPanel);
        self.update_image();
        Ok(())
    }

    /// Decode an image file and accept it as the coloring texture.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::TextureLoad`] if the file cannot be decoded
    /// or is too large for the device. Texturing stays as it was.
    pub fn load_texture(&mut self, path: &Path) -> Result<(), GasketError> {
        let image = image::open(path)?.to_rgba8();
        self.accept_texture(&image)?;
        log::info!("loaded coloring texture {}", path.display());
        Ok(())
    }

    /// The host's answer to [`UiRequest::ConfirmNeutralizeColoring`].
    pub fn answer_coloring_prompt(&mut self, neutralize: bool) {
        if neutralize {
            self.control.neutralize_coloring();
            self.requests.push(UiRequest::RefreshPanel);
            self.update_image();
        }
    }

    /// Write the control record to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::Io`] if the file cannot be written.
    pub fn save_control(&self, path: &Path) -> Result<(), GasketError> {
        self.control.save(path)?;
        log::info!("saved control record to {}", path.display());
        Ok(())
    }

    /// Replace the control record with one read from `path`.
    ///
    /// Raster size is kept from the current layout. If an image is loaded
    /// its size replaces the stored one; otherwise texturing is turned
    /// off. A restored record is never neutralized, so any pending
    /// coloring prompt is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::ControlBlob`] for a record of the wrong size
    /// or layout version and [`GasketError::Io`] if it cannot be read.
    /// The current record is untouched on error.
    pub fn load_control(&mut self, path: &Path) -> Result<(), GasketError> {
        let mut loaded = ControlState::load(path)?;
        loaded.x_size = self.control.x_size;
        loaded.y_size = self.control.y_size;
        if self.texture_loaded {
            loaded.txt_size = self.control.txt_size;
        } else {
            loaded.txt_on_off = 0;
        }
        self.control = loaded;
        self.coloring_prompt = false;
        self.requests
            .retain(|r| *r != UiRequest::ConfirmNeutralizeColoring);
        log::info!("loaded control record from {}", path.display());
        self.requests.push(UiRequest::RebuildPanel);
        self.update_image();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::started;
    use crate::options::Options;
    use crate::renderer::dispatcher::tests::MockBackend;
    use crate::engine::SessionHandler;
    use crate::engine::WidgetCommand;

    #[test]
    fn accepted_texture_prompts_once() {
        let mut session = started();
        let image = image::RgbaImage::new(64, 32);

        session.accept_texture(&image).unwrap();

        assert!(session.control().texture_enabled());
        assert_eq!(session.control().txt_size, [64.0, 32.0]);
        assert_eq!(
            session.dispatcher().backend().coloring,
            Some((64, 32))
        );
        assert!(session.take_frame_ready());

        session.tick();
        session.tick();
        let prompts = session
            .drain_ui_requests()
            .into_iter()
            .filter(|r| *r == UiRequest::ConfirmNeutralizeColoring)
            .count();
        assert_eq!(prompts, 1);
    }

    #[test]
    fn neutralize_answer_applies_preset() {
        let mut session = started();
        session.accept_texture(&image::RgbaImage::new(4, 4)).unwrap();
        session.answer_coloring_prompt(true);
        assert_eq!(session.control().lighting.specular, 0.7);
        assert_eq!(session.control().lighting.ambient, 0.0);

        let mut declined = started();
        let before = declined.control().lighting;
        declined.accept_texture(&image::RgbaImage::new(4, 4)).unwrap();
        declined.answer_coloring_prompt(false);
        assert_eq!(declined.control().lighting, before);
    }

    #[test]
    fn missing_texture_file_keeps_texturing_off() {
        let mut session = started();
        let err = session
            .load_texture(Path::new("/nonexistent/texture.png"))
            .unwrap_err();
        assert!(matches!(err, GasketError::TextureLoad(_)));
        assert!(!session.control().texture_enabled());
    }

    #[test]
    fn control_save_and_load() {
        let dir = std::env::temp_dir().join("gasket_session_control_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("view.ctl");

        let mut session = started();
        session.on_command(WidgetCommand::Style);
        session.on_drag(10.0, 4.0);
        let saved = *session.control();
        session.save_control(&path).unwrap();

        let mut other = started();
        other.load_control(&path).unwrap();
        assert_eq!(other.control().style, saved.style);
        assert_eq!(other.control().camera, saved.camera);
        assert_eq!(other.control().x_size, 875);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn restored_record_survives_texture_start_up() {
        let dir = std::env::temp_dir().join("gasket_session_restore_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scene.ctl");

        let mut saved = ControlState::new();
        saved.lighting.ambient = 0.8;
        saved.color = [0.2, 0.4, 0.6];
        saved.txt_center = [0.3, 0.7, 0.05];
        saved.txt_on_off = 1;
        saved.save(&path).unwrap();

        let mut session = started();
        session.accept_texture(&image::RgbaImage::new(64, 32)).unwrap();
        session.load_control(&path).unwrap();
        session.tick();
        session.tick();

        assert!(!session
            .drain_ui_requests()
            .contains(&UiRequest::ConfirmNeutralizeColoring));
        let control = session.control();
        assert_eq!(control.lighting.ambient, 0.8);
        assert_eq!(control.color, [0.2, 0.4, 0.6]);
        assert_eq!(control.txt_center, [0.3, 0.7, 0.05]);
        assert_eq!(control.txt_size, [64.0, 32.0]);
        assert!(control.texture_enabled());

        let mut bare = started();
        bare.load_control(&path).unwrap();
        assert!(!bare.control().texture_enabled());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn oversized_texture_is_rejected() {
        let mut session = Session::new(
            MockBackend {
                texture_limit: Some(32),
                ..MockBackend::default()
            },
            Options::default(),
        );
        session.window_appeared(1000, 800);
        session.tick();
        let before = *session.control();
        let _ = session.drain_ui_requests();

        let err = session
            .accept_texture(&image::RgbaImage::new(64, 8))
            .unwrap_err();

        assert!(matches!(err, GasketError::TextureLoad(_)));
        assert_eq!(*session.control(), before);
        assert_eq!(session.dispatcher().backend().coloring, None);
        session.tick();
        assert!(session.drain_ui_requests().is_empty());
    }

    #[test]
    fn truncated_control_is_rejected() {
        let dir = std::env::temp_dir().join("gasket_session_bad_control");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("short.ctl");
        std::fs::write(&path, [0_u8; 17]).unwrap();

        let mut session = started();
        let before = *session.control();
        let err = session.load_control(&path).unwrap_err();
        assert!(matches!(err, GasketError::ControlBlob(_)));
        assert_eq!(session.control().camera, before.camera);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
