//! Theme and Colors
//!
//! GraceWise's palette: warm gold accents on a dark terminal, soft sage for
//! the user's own words.

use ratatui::style::Color;

// ============================================================================
// Bubble Colors
// ============================================================================

/// User bubble text
pub const USER_SAGE: Color = Color::Rgb(150, 200, 150);

/// Assistant bubble text
pub const GRACE_GOLD: Color = Color::Rgb(230, 190, 110);

/// Error bubble text
pub const ERROR_RED: Color = Color::Rgb(255, 100, 100);

/// Pending indicator dots
pub const PENDING_BLUE: Color = Color::Rgb(150, 180, 255);

// ============================================================================
// UI Colors
// ============================================================================

/// Welcome placeholder and hints
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Separators and borders
pub const BORDER_GRAY: Color = Color::DarkGray;

/// Disabled input text
pub const DISABLED_GRAY: Color = Color::Rgb(80, 80, 80);

/// Sidebar heading
pub const SIDEBAR_HEADING: Color = Color::Yellow;
