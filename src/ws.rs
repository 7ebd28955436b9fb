use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::api::ws_url;
use crate::models::ServerEvent;

/// Live chat connection, one per mount of the root view. Nothing reconnects
/// after a close; the user reloads the page instead.
#[derive(Clone)]
pub struct ChatSocket {
    socket: WebSocket,
}

impl ChatSocket {
    /// Sends raw user text, fire-and-forget. A no-op unless the connection
    /// is currently open.
    pub fn send(&self, text: &str) {
        if self.socket.ready_state() == WebSocket::OPEN {
            let _ = self.socket.send_with_str(text);
        }
    }

    /// Close gracefully (view unmount).
    pub fn close(&self) {
        let _ = self.socket.close();
    }
}

/// Opens the chat socket and forwards every decoded server event to
/// `on_event`. Undecodable frames are logged and dropped by the decoder.
pub fn connect(on_event: impl Fn(ServerEvent) + 'static) -> Result<ChatSocket, String> {
    let socket = WebSocket::new(&ws_url()).map_err(|e| format!("Failed to connect: {e:?}"))?;
    socket.set_binary_type(web_sys::BinaryType::Arraybuffer);

    // --- onopen ---
    let onopen = Closure::<dyn Fn()>::new(move || {
        log::info!("WebSocket connected");
    });
    socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    // --- onmessage: sentinel or tagged payload ---
    let onmessage = Closure::<dyn Fn(MessageEvent)>::new(move |ev: MessageEvent| {
        if let Some(text) = ev.data().as_string() {
            if let Some(event) = ServerEvent::decode(&text) {
                on_event(event);
            }
        }
    });
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    // --- onclose ---
    let onclose = Closure::<dyn Fn(CloseEvent)>::new(move |_ev: CloseEvent| {
        log::info!("WebSocket disconnected");
    });
    socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    onclose.forget();

    // --- onerror ---
    let onerror = Closure::<dyn Fn()>::new(move || {
        log::error!("WebSocket connection error");
    });
    socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    Ok(ChatSocket { socket })
}
