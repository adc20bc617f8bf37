//! Closed string sets used by enumerated attributes.
//!
//! Each enum mirrors a `VALUES` slice that the schema tables reference;
//! `parse` falls back to `None` (→ schema default) for anything outside
//! the set.

// =============================================================================
// Align
// =============================================================================

pub const ALIGN_VALUES: &[&str] = &["left", "center", "right"];

/// Block alignment within the content column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

// =============================================================================
// Button choice sets
// =============================================================================

pub const VARIANT_VALUES: &[&str] = &[
    "solid", "bordered", "light", "flat", "faded", "shadow", "ghost",
];

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Solid,
    Bordered,
    Light,
    Flat,
    Faded,
    Shadow,
    Ghost,
}

impl ButtonVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "solid" => Some(Self::Solid),
            "bordered" => Some(Self::Bordered),
            "light" => Some(Self::Light),
            "flat" => Some(Self::Flat),
            "faded" => Some(Self::Faded),
            "shadow" => Some(Self::Shadow),
            "ghost" => Some(Self::Ghost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Bordered => "bordered",
            Self::Light => "light",
            Self::Flat => "flat",
            Self::Faded => "faded",
            Self::Shadow => "shadow",
            Self::Ghost => "ghost",
        }
    }
}

pub const COLOR_VALUES: &[&str] = &[
    "default", "primary", "secondary", "success", "warning", "danger", "custom",
];

/// Button color token. `Custom` requires a `customColor` hex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonColor {
    Default,
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Custom,
}

impl ButtonColor {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "default" => Some(Self::Default),
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "danger" => Some(Self::Danger),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Custom => "custom",
        }
    }
}

pub const SIZE_VALUES: &[&str] = &["sm", "md", "lg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sm" => Some(Self::Sm),
            "md" => Some(Self::Md),
            "lg" => Some(Self::Lg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

pub const RADIUS_VALUES: &[&str] = &["none", "sm", "md", "lg", "full"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonRadius {
    None,
    Sm,
    #[default]
    Md,
    Lg,
    Full,
}

impl ButtonRadius {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "sm" => Some(Self::Sm),
            "md" => Some(Self::Md),
            "lg" => Some(Self::Lg),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Full => "full",
        }
    }
}
