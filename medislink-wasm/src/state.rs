use leptos::prelude::*;
use medislink_core::{AdminAction, ConfirmGate, ConfirmRequest, NOTIFICATION_TIMEOUT, Notifier};

use crate::api::WasmApi;
use crate::route::Route;
use crate::signals::follow_route;
use crate::storage;

/// Общие для всех страниц сигналы: токен, маршрут, уведомление и диалог
/// подтверждения.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) token: RwSignal<Option<String>>,
    pub(crate) route: RwSignal<Route>,
    pub(crate) notifier: RwSignal<Notifier>,
    pub(crate) gate: RwSignal<ConfirmGate<AdminAction>>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            token: RwSignal::new(storage::load_token()),
            route: RwSignal::new(current_route()),
            notifier: RwSignal::new(Notifier::default()),
            gate: RwSignal::new(ConfirmGate::default()),
        }
    }

    pub(crate) fn api(&self) -> WasmApi {
        WasmApi::new(self.token.get_untracked())
    }

    /// Даёт `&mut Notifier` и, если появилось новое уведомление, заводит
    /// таймер на его скрытие.
    pub(crate) fn with_notifier<R>(&self, f: impl FnOnce(&mut Notifier) -> R) -> R {
        let mut notifier = self.notifier.get_untracked();
        let before = notifier.current_ticket();
        let out = f(&mut notifier);
        let after = notifier.current_ticket();
        self.notifier.set(notifier);

        if let Some(ticket) = after.filter(|ticket| Some(*ticket) != before) {
            let signal = self.notifier;
            set_timeout(
                move || {
                    signal.update(|notifier| {
                        notifier.expire(ticket);
                    })
                },
                NOTIFICATION_TIMEOUT,
            );
        }
        out
    }

    pub(crate) fn notify_error(&self, message: impl Into<String>) {
        self.with_notifier(|notifier| notifier.error(message));
    }

    pub(crate) fn ask(&self, request: ConfirmRequest<AdminAction>) {
        self.gate.update(|gate| gate.ask(request));
    }

    /// Меняет `location.hash`; маршрут подхватит обработчик `hashchange`.
    pub(crate) fn navigate(&self, route: Route) {
        let Some(window) = web_sys::window() else {
            follow_route(self.route, route);
            return;
        };
        if let Err(err) = window.location().set_hash(&route.path()) {
            leptos::logging::error!("navigation failed: {err:?}");
            follow_route(self.route, route);
        }
    }

    /// Удаляет токен и уводит на страницу входа.
    pub(crate) fn sign_out(&self) {
        if let Err(err) = storage::clear_token() {
            leptos::logging::error!("{err}");
        }
        self.token.set(None);
        self.navigate(Route::Login);
    }
}

pub(crate) fn current_route() -> Route {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .map(|hash| Route::parse(&hash))
        .unwrap_or_default()
}
