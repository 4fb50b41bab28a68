use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct NoticeProps {
    #[prop_or_default]
    pub message: Option<AttrValue>,
    pub ondismiss: Callback<MouseEvent>,
}

/// Non-blocking replacement for `alert`, rendered into document.body so it overlays the board.
#[function_component]
pub(crate) fn NoticeView(props: &NoticeProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    let dialog = html! {
        <dialog id="notice" open={true}>
            <article>
                <p>{message}</p>
                <footer>
                    <button onclick={props.ondismiss.clone()}>{"OK"}</button>
                </footer>
            </article>
        </dialog>
    };
    create_portal(dialog, gloo::utils::body().into())
}
