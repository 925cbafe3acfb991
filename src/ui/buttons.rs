//! Button builders shared by every command so labels line up across rows.
use crate::ui::style::{pad_narrow, pad_primary, pad_std};
use serenity::builder::CreateButton;
use serenity::model::application::ButtonStyle;

pub struct Btn;
impl Btn {
    pub fn primary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_primary(label))
            .style(ButtonStyle::Primary)
    }
    pub fn success(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_primary(label))
            .style(ButtonStyle::Success)
    }
    pub fn secondary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_std(label))
            .style(ButtonStyle::Secondary)
    }
    /// Compact attack-style button; disabled when the player cannot afford it.
    pub fn action(id: &str, label: &str, enabled: bool) -> CreateButton {
        CreateButton::new(id)
            .label(pad_narrow(label))
            .style(if enabled {
                ButtonStyle::Danger
            } else {
                ButtonStyle::Secondary
            })
            .disabled(!enabled)
    }
    /// A tab in a switcher row; the current tab is highlighted.
    pub fn tab(id: &str, label: &str, active: bool) -> CreateButton {
        if active {
            Self::primary(id, label)
        } else {
            Self::secondary(id, label)
        }
    }
}
