//! Win32 hooks: low-level keyboard, WM_DROPFILES and layered-window click-through.

use std::ffi::c_void;
use std::path::PathBuf;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};
use windows::Win32::Foundation::{
    HINSTANCE, HWND, LPARAM, LRESULT, POINT, SetLastError, WIN32_ERROR, WPARAM,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Shell::{DragAcceptFiles, DragFinish, DragQueryFileW, DragQueryPoint, HDROP};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GWL_EXSTYLE, GetWindowLongW, HHOOK, KBDLLHOOKSTRUCT, MSG,
    PM_REMOVE, PeekMessageW, SetWindowLongW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, WH_GETMESSAGE, WH_KEYBOARD_LL, WM_DROPFILES, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN,
    WM_SYSKEYUP, WS_EX_ACCEPTFILES, WS_EX_LAYERED, WS_EX_TRANSPARENT,
};
use windows::core::PCWSTR;

use crate::geometry::Point2;
use crate::hooks::errors::HookError;
use crate::hooks::queue::HookQueue;
use crate::hooks::traits::InputHooks;
use crate::hooks::types::{
    DroppedFiles, HookKind, KeyEvent, KeyTransition, click_through_style, ex_style,
};

const _: () = assert!(
    WS_EX_ACCEPTFILES.0 == ex_style::ACCEPT_FILES
        && WS_EX_TRANSPARENT.0 == ex_style::TRANSPARENT
        && WS_EX_LAYERED.0 == ex_style::LAYERED
);

// Hook procedures are plain functions, so their handles and sinks are process-wide.
static KEY_HOOK: AtomicIsize = AtomicIsize::new(0);
static DROP_HOOK: AtomicIsize = AtomicIsize::new(0);
static KEY_SINK: Mutex<Option<HookQueue<KeyEvent>>> = Mutex::new(None);
static DROP_SINK: Mutex<Option<HookQueue<DroppedFiles>>> = Mutex::new(None);

fn lock<T>(sink: &Mutex<T>) -> MutexGuard<'_, T> {
    sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn load_hook(slot: &AtomicIsize) -> Option<HHOOK> {
    match slot.load(Ordering::Acquire) {
        0 => None,
        raw => Some(HHOOK(raw as *mut c_void)),
    }
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        let transition = match wparam.0 as u32 {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyTransition::Down),
            WM_KEYUP | WM_SYSKEYUP => Some(KeyTransition::Up),
            _ => None,
        };
        if let Some(transition) = transition {
            // SAFETY: for WH_KEYBOARD_LL, lparam points to a KBDLLHOOKSTRUCT.
            let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
            if let Some(queue) = lock(&KEY_SINK).as_ref() {
                queue.push(KeyEvent {
                    key: crate::events::VirtualKey(info.vkCode),
                    transition,
                });
            }
        }
    }
    unsafe { CallNextHookEx(load_hook(&KEY_HOOK), code, wparam, lparam) }
}

unsafe extern "system" fn get_message_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        // SAFETY: for WH_GETMESSAGE, lparam points to the retrieved MSG.
        let msg = unsafe { &*(lparam.0 as *const MSG) };
        if msg.message == WM_DROPFILES {
            let hdrop = HDROP(msg.wParam.0 as *mut c_void);
            let dropped = unsafe { read_drop(hdrop) };
            if let Some(queue) = lock(&DROP_SINK).as_ref() {
                queue.push(dropped);
            }
        }
    }
    unsafe { CallNextHookEx(load_hook(&DROP_HOOK), code, wparam, lparam) }
}

unsafe fn read_drop(hdrop: HDROP) -> DroppedFiles {
    let mut point = POINT::default();
    let _ = unsafe { DragQueryPoint(hdrop, &mut point) };

    // An index of 0xFFFFFFFF asks for the file count.
    let count = unsafe { DragQueryFileW(hdrop, u32::MAX, None) };
    let mut paths = Vec::with_capacity(count as usize);
    for index in 0..count {
        let len = unsafe { DragQueryFileW(hdrop, index, None) } as usize;
        let mut buf = vec![0u16; len + 1];
        let written = unsafe { DragQueryFileW(hdrop, index, Some(&mut buf)) } as usize;
        paths.push(PathBuf::from(String::from_utf16_lossy(
            &buf[..written.min(buf.len())],
        )));
    }
    unsafe { DragFinish(hdrop) };

    DroppedFiles {
        paths,
        position: Point2::new(point.x as f32, point.y as f32),
    }
}

fn module_instance(hook: HookKind) -> Result<HINSTANCE, HookError> {
    let module = unsafe { GetModuleHandleW(PCWSTR::null()) }.map_err(|e| {
        HookError::InstallFailed {
            hook,
            message: e.to_string(),
        }
    })?;
    Ok(module.into())
}

/// Hooks for the companion window identified by `own_handle`.
///
/// The keyboard hook is global and works without a window; file drops and
/// click-through need the companion's own window.
#[derive(Debug)]
pub struct WindowsHooks {
    own_window: Option<HWND>,
}

impl WindowsHooks {
    pub fn new(own_handle: Option<u64>) -> Self {
        Self {
            own_window: own_handle.map(|h| HWND(h as *mut c_void)),
        }
    }

    fn window(&self, hook: HookKind) -> Result<HWND, HookError> {
        self.own_window.ok_or_else(|| HookError::InstallFailed {
            hook,
            message: "no companion window to attach to".to_string(),
        })
    }
}

impl InputHooks for WindowsHooks {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn install_key_hook(&mut self, queue: HookQueue<KeyEvent>) -> Result<(), HookError> {
        let instance = module_instance(HookKind::Keyboard)?;
        *lock(&KEY_SINK) = Some(queue);

        let hook = unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), Some(instance), 0) }
            .map_err(|e| {
                *lock(&KEY_SINK) = None;
                HookError::InstallFailed {
                    hook: HookKind::Keyboard,
                    message: e.to_string(),
                }
            })?;
        KEY_HOOK.store(hook.0 as isize, Ordering::Release);

        info!(event = "core.hooks.keyboard_installed");
        Ok(())
    }

    fn install_drop_hook(&mut self, queue: HookQueue<DroppedFiles>) -> Result<(), HookError> {
        let window = self.window(HookKind::FileDrop)?;
        let instance = module_instance(HookKind::FileDrop)?;
        *lock(&DROP_SINK) = Some(queue);

        let thread_id = unsafe { GetCurrentThreadId() };
        let hook = unsafe {
            SetWindowsHookExW(WH_GETMESSAGE, Some(get_message_proc), Some(instance), thread_id)
        }
        .map_err(|e| {
            *lock(&DROP_SINK) = None;
            HookError::InstallFailed {
                hook: HookKind::FileDrop,
                message: e.to_string(),
            }
        })?;
        DROP_HOOK.store(hook.0 as isize, Ordering::Release);
        unsafe { DragAcceptFiles(window, true) };

        info!(event = "core.hooks.file_drop_installed");
        Ok(())
    }

    fn set_click_through(&mut self, allow: bool) -> Result<(), HookError> {
        let window = self.window(HookKind::ClickThrough)?;
        let current = unsafe { GetWindowLongW(window, GWL_EXSTYLE) } as u32;
        let style = click_through_style(current, allow);

        // Zero is also a valid previous style, so only a set last-error means failure.
        unsafe { SetLastError(WIN32_ERROR(0)) };
        let previous = unsafe { SetWindowLongW(window, GWL_EXSTYLE, style as i32) };
        if previous == 0 {
            let error = windows::core::Error::from_win32();
            if error.code().is_err() {
                return Err(HookError::InstallFailed {
                    hook: HookKind::ClickThrough,
                    message: error.to_string(),
                });
            }
        }
        debug!(event = "core.hooks.click_through_applied", allow = allow, style = style);
        Ok(())
    }

    fn poll(&mut self) {
        let mut msg = MSG::default();
        while unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE) }.as_bool() {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    fn uninstall_all(&mut self) {
        for (slot, name) in [(&KEY_HOOK, "keyboard"), (&DROP_HOOK, "file-drop")] {
            if let Some(hook) = load_hook(slot) {
                if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
                    debug!(event = "core.hooks.unhook_failed", hook = name, error = %e);
                }
                slot.store(0, Ordering::Release);
            }
        }
        if let Some(window) = self.own_window {
            unsafe { DragAcceptFiles(window, false) };
        }
        *lock(&KEY_SINK) = None;
        *lock(&DROP_SINK) = None;
    }
}
