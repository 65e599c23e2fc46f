//! Parameter panel description.
//!
//! The panel itself lives in the host UI. This module only says what it
//! contains, in order, through the [`WidgetPanel`] trait: the host
//! implements the trait, [`build_panel`] drives it, and widget edits come
//! back through [`Session::set_float`](crate::engine::Session::set_float)
//! and friends. Ranges come from [`FloatParam::range`] and
//! [`TripletParam::range`].

use crate::control::{FloatParam, Style, TripletParam};
use crate::engine::WidgetCommand;

/// Widget sink implemented by the host's panel.
///
/// `hotkey` is the single-character key the panel binds to the widget,
/// or empty for none.
pub trait WidgetPanel {
    /// Drop all widgets.
    fn reset(&mut self);
    /// Slider for one scalar.
    fn add_single_float(&mut self, hotkey: &str, param: FloatParam, label: &str);
    /// Three linked sliders.
    fn add_triplet(&mut self, hotkey: &str, param: TripletParam, label: &str);
    /// Background band spanning the next `rows` rows, lit while
    /// `command` is highlighted.
    fn add_color(&mut self, command: WidgetCommand, rows: f32);
    /// Button.
    fn add_command(&mut self, hotkey: &str, label: &str, command: WidgetCommand);
    /// Separator.
    fn add_line(&mut self);
    /// Redraw from current values.
    fn refresh(&mut self);
}

const SHADING_ROWS: [(&str, FloatParam, &str); 10] = [
    ("4", FloatParam::Ambient, "ambient"),
    ("", FloatParam::Diffuse, "diffuse"),
    ("", FloatParam::Specular, "specular"),
    ("", FloatParam::Harshness, "harsh"),
    ("", FloatParam::Saturation, "saturate"),
    ("G", FloatParam::Gamma, "gamma"),
    ("", FloatParam::ShadowMin, "sMin"),
    ("", FloatParam::ShadowMax, "sMax"),
    ("", FloatParam::ShadowMult, "sMult"),
    ("", FloatParam::ShadowAmt, "sAmt"),
];

/// Rebuild `panel` for `style`. The third fractal parameter only exists
/// for [`Style::Apollonian1`].
pub fn build_panel(panel: &mut impl WidgetPanel, style: Style) {
    panel.reset();
    panel.add_single_float("Z", FloatParam::Zoom, "Zoom");
    panel.add_single_float("D", FloatParam::MinDist, "minDist");
    panel.add_single_float("2", FloatParam::Multiplier, "Multiplier");
    panel.add_single_float("3", FloatParam::Dali, "Dali");
    panel.add_line();
    panel.add_triplet("L", TripletParam::Light, "Light");
    panel.add_triplet("C", TripletParam::Tint, "Tint");

    panel.add_color(WidgetCommand::AutoChg, 11.0);
    for (hotkey, param, label) in SHADING_ROWS {
        panel.add_single_float(hotkey, param, label);
    }
    panel.add_command("5", "auto Chg", WidgetCommand::AutoChg);

    panel.add_line();
    panel.add_command("S", style.label(), WidgetCommand::Style);
    panel.add_single_float("6", FloatParam::Foam, "Param1");
    panel.add_single_float("7", FloatParam::Foam2, "Param2");
    if style.uses_bend() {
        panel.add_single_float("8", FloatParam::Bend, "Param3");
    }

    panel.add_line();
    panel.add_single_float("F", FloatParam::Fog, "Fog");
    panel.add_line();
    panel.add_command("V", "Save/Load", WidgetCommand::SaveLoad);
    panel.add_command("H", "Help", WidgetCommand::Help);
    panel.add_command("N", "Reset", WidgetCommand::Reset);

    panel.add_line();
    panel.add_color(WidgetCommand::Stereo, 2.0);
    panel.add_command("O", "Stereo", WidgetCommand::Stereo);
    panel.add_single_float("P", FloatParam::Parallax, "Parallax");

    panel.add_line();
    panel.add_command("M", "Move", WidgetCommand::Move);
    panel.add_command("R", "Rotate", WidgetCommand::Rotate);

    panel.add_line();
    panel.add_color(WidgetCommand::Texture, 0.9);
    panel.add_command("9", "Texture", WidgetCommand::Texture);
    panel.add_triplet("T", TripletParam::TextureCenter, "Pos, Sz");

    panel.refresh();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Row {
        Float(FloatParam),
        Triplet(TripletParam),
        Color(WidgetCommand),
        Command(WidgetCommand, String),
        Line,
    }

    #[derive(Default)]
    struct RecordingPanel {
        rows: Vec<Row>,
        hotkeys: Vec<String>,
        refreshed: bool,
    }

    impl WidgetPanel for RecordingPanel {
        fn reset(&mut self) {
            self.rows.clear();
            self.hotkeys.clear();
            self.refreshed = false;
        }
        fn add_single_float(&mut self, hotkey: &str, param: FloatParam, _: &str) {
            self.rows.push(Row::Float(param));
            self.hotkeys.push(hotkey.to_owned());
        }
        fn add_triplet(&mut self, hotkey: &str, param: TripletParam, _: &str) {
            self.rows.push(Row::Triplet(param));
            self.hotkeys.push(hotkey.to_owned());
        }
        fn add_color(&mut self, command: WidgetCommand, _: f32) {
            self.rows.push(Row::Color(command));
        }
        fn add_command(&mut self, hotkey: &str, label: &str, command: WidgetCommand) {
            self.rows.push(Row::Command(command, label.to_owned()));
            self.hotkeys.push(hotkey.to_owned());
        }
        fn add_line(&mut self) {
            self.rows.push(Row::Line);
        }
        fn refresh(&mut self) {
            self.refreshed = true;
        }
    }

    fn built(style: Style) -> RecordingPanel {
        let mut panel = RecordingPanel::default();
        build_panel(&mut panel, style);
        panel
    }

    #[test]
    fn bend_only_in_first_style() {
        assert!(built(Style::Apollonian1)
            .rows
            .contains(&Row::Float(FloatParam::Bend)));
        assert!(!built(Style::Apollonian2)
            .rows
            .contains(&Row::Float(FloatParam::Bend)));
    }

    #[test]
    fn style_button_shows_style_name() {
        let rows = built(Style::Apollonian2).rows;
        assert!(rows.contains(&Row::Command(
            WidgetCommand::Style,
            "Apollonian2".to_owned()
        )));
    }

    #[test]
    fn highlight_bands_precede_their_buttons() {
        let rows = built(Style::Apollonian1).rows;
        for command in [
            WidgetCommand::AutoChg,
            WidgetCommand::Stereo,
            WidgetCommand::Texture,
        ] {
            let band = rows.iter().position(|r| *r == Row::Color(command));
            let button = rows
                .iter()
                .position(|r| matches!(r, Row::Command(c, _) if *c == command));
            assert!(band.unwrap() < button.unwrap());
        }
    }

    #[test]
    fn all_shading_terms_listed_and_refreshed() {
        let panel = built(Style::Apollonian1);
        let floats = panel
            .rows
            .iter()
            .filter(|r| matches!(r, Row::Float(_)))
            .count();
        // zoom, minDist, multiplier, dali, 10 shading, foam, foam2, bend,
        // fog, parallax
        assert_eq!(floats, 19);
        assert!(panel.refreshed);
    }

    #[test]
    fn hotkeys_are_unique() {
        let panel = built(Style::Apollonian1);
        let mut keys: Vec<&String> =
            panel.hotkeys.iter().filter(|k| !k.is_empty()).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn rebuild_replaces_rows() {
        let mut panel = built(Style::Apollonian1);
        let first = panel.rows.len();
        build_panel(&mut panel, Style::Apollonian2);
        assert_eq!(panel.rows.len(), first - 1);
    }
}
