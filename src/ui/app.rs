//! Main page of the app

use crate::config::BridgeConfig;
use crate::message_log::MessageLog;
use crate::neutralino::{BrowserScheduler, NeutralinoHost, app_version};
use crate::page::PageController;
use crate::ui::components::{MessageLogView, Status};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub type AppPage = PageController<NeutralinoHost, BrowserScheduler>;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    #[prop_or_default]
    pub config: BridgeConfig,
}

#[derive(Clone, PartialEq)]
enum PageState {
    Starting,
    Ready,
    Error(String),
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let page = use_memo(props.config.clone(), |config| {
        AppPage::new(
            NeutralinoHost,
            BrowserScheduler,
            config.clone(),
            app_version(),
        )
    });
    let state = use_state(|| PageState::Starting);
    let messages = use_reducer(MessageLog::new);

    // Wire the host once the page is mounted
    {
        let page = page.clone();
        let state = state.clone();
        let dispatcher = messages.dispatcher();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match page.start(move |text| dispatcher.dispatch(text)).await {
                    Ok(()) => state.set(PageState::Ready),
                    Err(e) => {
                        log::error!("Start-up failed: {}", e);
                        state.set(PageState::Error(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_long_run = {
        let page = page.clone();
        Callback::from(move |_| {
            page.on_long_run_click();
        })
    };

    let on_ping = {
        let page = page.clone();
        Callback::from(move |_| {
            page.on_ping_click("Neutralino says PING");
        })
    };

    let on_quit = {
        let page = page.clone();
        let state = state.clone();
        Callback::from(move |_| {
            let page = page.clone();
            let state = state.clone();
            spawn_local(async move {
                if let Err(e) = page.quit().await {
                    state.set(PageState::Error(format!("Quit failed: {}", e)));
                }
            });
        })
    };

    let ready = *state == PageState::Ready;
    let error = match &*state {
        PageState::Error(err) => Some(err.clone()),
        _ => None,
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{page.window_title()}</h1>

            <Status {ready} {error} />

            <div class="flex-column-gap">
                <div id="link-long-run">
                    <Button onclick={on_long_run} disabled={!ready} variant={ButtonVariant::Link}>
                        {"Start long running task"}
                    </Button>
                </div>
                <Button onclick={on_ping} disabled={!ready} variant={ButtonVariant::Secondary}>
                    {"Ping"}
                </Button>
                <Button onclick={on_quit} disabled={!ready} variant={ButtonVariant::Danger}>
                    {"Quit"}
                </Button>
            </div>

            <MessageLogView content={messages.content()} id={"msg"} />
        </div>
    }
}
