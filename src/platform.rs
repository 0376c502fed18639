//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the copy shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Copy reference number shortcut display
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Step navigation and submit shortcuts work the same everywhere
pub const NEXT_SHORTCUT: &str = "Ctrl+N";
pub const BACK_SHORTCUT: &str = "Ctrl+B";
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";
pub const SWITCH_VIEW_SHORTCUT: &str = "Ctrl+T";
