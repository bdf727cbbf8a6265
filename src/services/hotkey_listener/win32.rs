use super::supervisor::{HookBackend, HookSupervisor};
use super::r#trait::HotkeyListenerTrait;
use crate::config::Config;
use crate::error::{Result, SwitchError};
use crate::events::SwitcherEvent;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{VK_LMENU, VK_MENU, VK_RMENU, VK_TAB};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    TranslateMessage, UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT, LLKHF_ALTDOWN,
    LLKHF_INJECTED, MSG, WH_KEYBOARD_LL, WM_APP, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN,
    WM_SYSKEYUP,
};

/// Thread message asking the pump to drop and re-create its hook. Hooks must
/// be (re)installed from the thread that pumps them.
const WM_REARM_HOOKS: u32 = WM_APP + 1;

/// Two chord deliveries closer than this are one keystroke seen twice, not a
/// fast repeat; compared against the event's own timestamp.
const CYCLE_DEBOUNCE_MS: u32 = 15;

// The hook proc is a bare extern "system" fn, so the channel and pump thread
// id live in statics it can reach.
static EVENT_SINK: OnceCell<mpsc::Sender<SwitcherEvent>> = OnceCell::new();
static PUMP_THREAD_ID: AtomicU32 = AtomicU32::new(0);
static LAST_CYCLE_TIME: AtomicU32 = AtomicU32::new(0);

pub struct Win32HotkeyListener {
    config: Arc<Config>,
    tx: mpsc::Sender<SwitcherEvent>,
}

impl Win32HotkeyListener {
    pub fn new(config: Arc<Config>, tx: mpsc::Sender<SwitcherEvent>) -> Self {
        Self { config, tx }
    }
}

#[async_trait::async_trait]
impl HotkeyListenerTrait for Win32HotkeyListener {
    async fn run(self: Box<Self>) -> Result<()> {
        info!("starting Win32 hotkey listener");
        let backend = Win32HookBackend { tx: self.tx.clone() };
        HookSupervisor::new(backend, self.config.guard_interval())
            .run()
            .await
    }
}

struct Win32HookBackend {
    tx: mpsc::Sender<SwitcherEvent>,
}

impl HookBackend for Win32HookBackend {
    fn install(&mut self) -> Result<()> {
        EVENT_SINK.get_or_init(|| self.tx.clone());

        let pump = PUMP_THREAD_ID.load(Ordering::SeqCst);
        if pump == 0 {
            spawn_pump_thread()
        } else {
            // Existing pump re-arms in place: unhook, hook again.
            unsafe { PostThreadMessageW(pump, WM_REARM_HOOKS, WPARAM(0), LPARAM(0)) }
                .map_err(|e| SwitchError::Hook(format!("rearm request not delivered: {}", e)))
        }
    }
}

/// Start the dedicated hook thread and wait until its first hook is armed.
fn spawn_pump_thread() -> Result<()> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<std::result::Result<u32, String>>();

    std::thread::Builder::new()
        .name("tabswitch-hook".to_string())
        .spawn(move || pump_loop(ready_tx))?;

    match ready_rx.recv_timeout(Duration::from_secs(2)) {
        Ok(Ok(thread_id)) => {
            PUMP_THREAD_ID.store(thread_id, Ordering::SeqCst);
            Ok(())
        }
        Ok(Err(e)) => Err(SwitchError::Hook(e)),
        Err(_) => Err(SwitchError::Hook(
            "hook thread did not report readiness".to_string(),
        )),
    }
}

fn pump_loop(ready: std::sync::mpsc::Sender<std::result::Result<u32, String>>) {
    unsafe {
        let mut hook = match install_ll_hook() {
            Ok(hook) => hook,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        let _ = ready.send(Ok(GetCurrentThreadId()));

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            if msg.message == WM_REARM_HOOKS {
                let _ = UnhookWindowsHookEx(hook);
                match install_ll_hook() {
                    Ok(new_hook) => {
                        hook = new_hook;
                        debug!("keyboard hook re-armed");
                    }
                    Err(e) => {
                        // Keep pumping; the next guard tick tries again.
                        error!("keyboard hook re-arm failed: {}", e);
                    }
                }
                continue;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        let _ = UnhookWindowsHookEx(hook);
    }

    // Let the next guard tick spawn a fresh pump instead of posting into
    // a dead thread.
    PUMP_THREAD_ID.store(0, Ordering::SeqCst);
}

unsafe fn install_ll_hook() -> Result<HHOOK> {
    SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0)
        .map_err(|e| SwitchError::Hook(format!("SetWindowsHookExW failed: {}", e)))
}

/// Low-level keyboard hook. Must return fast: Windows force-unhooks callbacks
/// that stall, so all it does is classify the key and `try_send`.
unsafe extern "system" fn keyboard_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code < 0 {
        return CallNextHookEx(None, code, wparam, lparam);
    }

    let kbd = &*(lparam.0 as *const KBDLLHOOKSTRUCT);

    // Our own synthesized Alt pulse from the activator comes back through
    // this hook; ignore injected input entirely.
    if kbd.flags.0 & LLKHF_INJECTED.0 != 0 {
        return CallNextHookEx(None, code, wparam, lparam);
    }

    let msg = wparam.0 as u32;
    let vk = kbd.vkCode as u16;

    let is_key_down = msg == WM_KEYDOWN || msg == WM_SYSKEYDOWN;
    let is_key_up = msg == WM_KEYUP || msg == WM_SYSKEYUP;
    let alt_held = kbd.flags.0 & LLKHF_ALTDOWN.0 != 0;

    if is_key_down && vk == VK_TAB.0 && alt_held {
        let last = LAST_CYCLE_TIME.swap(kbd.time, Ordering::Relaxed);
        if kbd.time.wrapping_sub(last) >= CYCLE_DEBOUNCE_MS && !send_event(SwitcherEvent::Cycle) {
            // Nobody listening: let the native switcher handle the chord.
            return CallNextHookEx(None, code, wparam, lparam);
        }
        // Swallow the chord either way once we own it, so the native
        // switcher never flashes behind ours.
        return LRESULT(1);
    }

    if is_key_up && (vk == VK_MENU.0 || vk == VK_LMENU.0 || vk == VK_RMENU.0) {
        send_event(SwitcherEvent::Commit);
        // Alt release passes through; applications track modifier state.
    }

    CallNextHookEx(None, code, wparam, lparam)
}

fn send_event(event: SwitcherEvent) -> bool {
    match EVENT_SINK.get() {
        Some(tx) => match tx.try_send(event) {
            Ok(()) => true,
            Err(e) => {
                // Queue full or receiver gone; drop rather than block the
                // hook thread.
                trace!("dropping {}: {}", event, e);
                false
            }
        },
        None => false,
    }
}
