//! Reusable UI components

use crate::message_log::MessageLog;
use std::rc::Rc;
use yew::prelude::*;

impl Reducible for MessageLog {
    type Action = String;

    fn reduce(self: Rc<Self>, text: String) -> Rc<Self> {
        let mut log = (*self).clone();
        log.append(text);
        log.into()
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageLogProps {
    /// Markup from `MessageLog::content`
    pub content: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
}

#[function_component(MessageLogView)]
pub fn message_log_view(props: &MessageLogProps) -> Html {
    html! {
        <div id={props.id.clone()} class="message-log">
            {Html::from_html_unchecked(props.content.clone())}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub ready: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    use patternfly_yew::prelude::{Alert, AlertType, Spinner};

    if let Some(err) = &props.error {
        return html! {
            <div class="message-top-margin">
                <Alert r#type={AlertType::Danger} title={"Host error"} inline={true}>
                    {err.clone()}
                </Alert>
            </div>
        };
    }

    if !props.ready {
        return html! {
            <div class="loading-text-center">
                <Spinner />
                <p class="loading-text">{"Connecting to extension..."}</p>
            </div>
        };
    }

    html! {}
}
