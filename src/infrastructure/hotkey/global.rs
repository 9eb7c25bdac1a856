//! OS-level hotkey source using global-hotkey
//!
//! Linux grabs keys on X11 (XWayland windows included); native Wayland
//! sessions without X11 should bind `bettrwrite run <id>` in the
//! compositor instead. On Windows the registering thread's message queue
//! is drained on every poll. macOS delivers hotkeys only to an application
//! run loop, so the source refuses to start there.

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::debug;

use crate::application::ports::{HotkeyError, HotkeyId, HotkeySource};
use crate::domain::shortcut::{KeyCombination, Modifier};

/// Hotkey source backed by the global-hotkey crate.
///
/// Registered hotkeys stay grabbed until this value is dropped.
pub struct GlobalHotkeySource {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
}

impl GlobalHotkeySource {
    pub fn new() -> Result<Self, HotkeyError> {
        platform_support()?;
        let manager =
            GlobalHotKeyManager::new().map_err(|e| HotkeyError::Unavailable(e.to_string()))?;
        Ok(Self {
            manager,
            registered: Vec::new(),
        })
    }
}

impl Drop for GlobalHotkeySource {
    fn drop(&mut self) {
        if let Err(e) = self.manager.unregister_all(&self.registered) {
            debug!(error = %e, "failed to release hotkeys");
        }
    }
}

impl HotkeySource for GlobalHotkeySource {
    fn register(&mut self, keys: &KeyCombination) -> Result<HotkeyId, HotkeyError> {
        let hotkey = to_hotkey(keys)?;
        self.manager
            .register(hotkey)
            .map_err(|e| HotkeyError::RegistrationFailed {
                keys: keys.to_string(),
                message: e.to_string(),
            })?;
        self.registered.push(hotkey);
        debug!(keys = %keys, id = hotkey.id(), "hotkey registered");
        Ok(hotkey.id())
    }

    fn poll(&mut self) -> Option<HotkeyId> {
        #[cfg(windows)]
        pump_messages();

        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            if matches!(event.state, HotKeyState::Pressed) {
                return Some(event.id);
            }
        }
        None
    }
}

#[cfg(target_os = "macos")]
fn platform_support() -> Result<(), HotkeyError> {
    Err(HotkeyError::Unavailable(
        "macOS delivers hotkeys only to an application run loop; \
         bind 'bettrwrite run <id>' to a system shortcut instead"
            .to_string(),
    ))
}

#[cfg(not(target_os = "macos"))]
fn platform_support() -> Result<(), HotkeyError> {
    Ok(())
}

/// Dispatch every pending message on this thread's queue.
///
/// global-hotkey reports `WM_HOTKEY` from the window procedure of a hidden
/// window owned by the thread that created the manager.
#[cfg(windows)]
fn pump_messages() -> usize {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
    };

    let mut dispatched = 0;
    // SAFETY: MSG is plain data and is only read after PeekMessageW fills it.
    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while PeekMessageW(&mut msg, std::ptr::null_mut(), 0, 0, PM_REMOVE) != 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
            dispatched += 1;
        }
    }
    dispatched
}

/// Convert a normalized combination to a global-hotkey `HotKey`
pub fn to_hotkey(keys: &KeyCombination) -> Result<HotKey, HotkeyError> {
    let mut modifiers = Modifiers::empty();
    for modifier in keys.modifiers() {
        modifiers |= match modifier {
            Modifier::Ctrl => Modifiers::CONTROL,
            Modifier::Alt => Modifiers::ALT,
            Modifier::Shift => Modifiers::SHIFT,
            Modifier::Super => Modifiers::SUPER,
        };
    }

    let code = key_code(keys.key()).ok_or_else(|| HotkeyError::UnsupportedKey {
        keys: keys.to_string(),
        key: keys.key().to_string(),
    })?;

    let modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(modifiers, code))
}

/// Physical key for a canonical key token
fn key_code(key: &str) -> Option<Code> {
    let code = match key {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" => Code::Enter,
        "tab" => Code::Tab,
        "esc" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" => Code::Delete,
        "insert" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "-" => Code::Minus,
        "=" => Code::Equal,
        "[" => Code::BracketLeft,
        "]" => Code::BracketRight,
        ";" => Code::Semicolon,
        "'" => Code::Quote,
        "," => Code::Comma,
        "." => Code::Period,
        "/" => Code::Slash,
        "\\" => Code::Backslash,
        "`" => Code::Backquote,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(s: &str) -> KeyCombination {
        s.parse().unwrap()
    }

    #[test]
    fn maps_modifiers_and_key() {
        let hotkey = to_hotkey(&combo("Ctrl+Shift+E")).unwrap();
        assert_eq!(
            hotkey,
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyE)
        );
    }

    #[test]
    fn equal_combinations_share_an_id() {
        let a = to_hotkey(&combo("ctrl+alt+r")).unwrap();
        let b = to_hotkey(&combo("Alt + Ctrl + R")).unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn named_keys_are_supported() {
        assert!(to_hotkey(&combo("ctrl+escape")).is_ok());
        assert!(to_hotkey(&combo("super+pgdn")).is_ok());
        assert!(to_hotkey(&combo("alt+f12")).is_ok());
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn macos_refuses_and_points_at_run() {
        let err = GlobalHotkeySource::new().err().unwrap();
        assert!(matches!(err, HotkeyError::Unavailable(ref m) if m.contains("bettrwrite run")));
    }

    #[cfg(windows)]
    #[test]
    fn poll_drains_the_thread_message_queue() {
        use windows_sys::Win32::System::Threading::GetCurrentThreadId;
        use windows_sys::Win32::UI::WindowsAndMessaging::{PostThreadMessageW, WM_USER};

        // The first peek creates the queue that PostThreadMessageW needs.
        pump_messages();
        unsafe {
            assert_ne!(PostThreadMessageW(GetCurrentThreadId(), WM_USER, 0, 0), 0);
            assert_ne!(PostThreadMessageW(GetCurrentThreadId(), WM_USER + 1, 0, 0), 0);
        }
        assert!(pump_messages() >= 2);
        assert_eq!(pump_messages(), 0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = to_hotkey(&combo("ctrl+capslock")).unwrap_err();
        assert!(matches!(err, HotkeyError::UnsupportedKey { ref key, .. } if key == "capslock"));
    }
}
