// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

This module defines all of the application's design tokens, following the W3C Design Tokens standard.

## Organization

- **Palette**: Base colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Modification

Tokens are designed to be consistent. Before modifying:
1. Check the impact on all components
2. Maintain ratios (e.g., MD = XS * 2)
3. Run validation tests
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    // Brand colors (teal scale)
    pub const PRIMARY_100: Color = Color::from_rgb(0.85, 0.96, 0.94); // Very light teal
    pub const PRIMARY_200: Color = Color::from_rgb(0.66, 0.89, 0.86); // Light teal
    pub const PRIMARY_400: Color = Color::from_rgb(0.22, 0.62, 0.58); // Medium teal
    pub const PRIMARY_500: Color = Color::from_rgb(0.08, 0.53, 0.49); // Primary teal
    pub const PRIMARY_600: Color = Color::from_rgb(0.06, 0.43, 0.40); // Medium dark teal
    pub const PRIMARY_700: Color = Color::from_rgb(0.04, 0.33, 0.31); // Dark teal
    pub const PRIMARY_800: Color = Color::from_rgb(0.03, 0.24, 0.22); // Very dark teal

    // Accent colors (orange scale, used for calls to action and the chart fill)
    pub const ACCENT_400: Color = Color::from_rgb(1.0, 0.72, 0.42);
    pub const ACCENT_500: Color = Color::from_rgb(0.976, 0.58, 0.18);
    pub const ACCENT_600: Color = Color::from_rgb(0.92, 0.47, 0.08);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OPAQUE: f32 = 1.0;

    /// Surface background - Semi-transparent panels and containers
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
    pub const XXL: f32 = 48.0; // 6 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Icon sizes
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_LG: f32 = 32.0;

    // Interactive element heights
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const INPUT_HEIGHT: f32 = 40.0;

    // Component widths
    pub const FORM_WIDTH: f32 = 360.0;
    pub const METRIC_CARD_WIDTH: f32 = 180.0;
    pub const TOAST_WIDTH: f32 = 320.0;

    // Chart canvases
    pub const CHART_HEIGHT: f32 = 220.0;

    /// Thickness of the chat panel's border drag strips.
    pub const PANEL_EDGE_THICKNESS: f32 = 12.0;
    /// Side length of the chat panel's corner resize handles.
    pub const PANEL_CORNER_SIZE: f32 = 12.0;
    /// Diameter of the round chat launcher button.
    pub const CHAT_LAUNCHER_SIZE: f32 = 56.0;
    /// Height of the chat panel header bar.
    pub const PANEL_HEADER_HEIGHT: f32 = 52.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    //! Font size scale for consistent text hierarchy.

    /// Large title - Main page headings (Dashboard, Settings, About)
    pub const TITLE_LG: f32 = 30.0;

    /// Medium title - App name, prominent labels
    pub const TITLE_MD: f32 = 20.0;

    /// Small title - Section headers
    pub const TITLE_SM: f32 = 18.0;

    /// Large body - Form inputs, emphasis text
    pub const BODY_LG: f32 = 16.0;

    /// Standard body - Most UI text, labels, descriptions
    pub const BODY: f32 = 14.0;

    /// Small body - Hints, secondary labels
    pub const BODY_SM: f32 = 13.0;

    /// Caption - Badges, axis labels, small info
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    /// Thin border - Subtle separators, input fields
    pub const WIDTH_SM: f32 = 1.0;

    /// Medium border - Emphasis borders, toast accents
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    // Spacing validation
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    // Opacity validation
    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::OVERLAY_MEDIUM > 0.0 && opacity::OVERLAY_MEDIUM < 1.0);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    // Sizing validation
    assert!(sizing::ICON_LG > sizing::ICON_MD);
    assert!(sizing::ICON_MD > sizing::ICON_SM);
    assert!(sizing::PANEL_EDGE_THICKNESS > 0.0);
    assert!(sizing::PANEL_CORNER_SIZE > 0.0);

    // Typography validation
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    // Border validation
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};
