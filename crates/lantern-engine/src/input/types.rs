/// Keyboard key identifier.
///
/// Intentionally minimal: game actions bind to these, and the platform layer
/// maps scancodes/keycodes into them. Keys without a variant use
/// `Key::Unknown(code)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform-dependent key not represented above.
    Unknown(u32),
}

/// Platform-agnostic input events fed to the runtime.
///
/// Pointer coordinates are device pixels relative to the drawing surface's
/// top-left corner; the runtime maps them to logical units using the scale
/// factor computed at the last resize.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased { x: f32, y: f32 },
}
