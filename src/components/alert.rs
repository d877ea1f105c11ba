use yew::prelude::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlertVariant {
    Danger,
    Success,
    Info,
}

impl AlertVariant {
    fn class(self) -> &'static str {
        match self {
            AlertVariant::Danger => "alert alert-danger",
            AlertVariant::Success => "alert alert-success",
            AlertVariant::Info => "alert alert-info",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub variant: AlertVariant,
    pub children: Children,
    /// When set, renders a dismiss button wired to this callback.
    #[prop_or_default]
    pub on_close: Option<Callback<()>>,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let close = props.on_close.clone().map(|cb| {
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(()));
        html! { <button class="alert-close" {onclick}>{ "×" }</button> }
    });
    html! {
        <div class={props.variant.class()} role="alert">
            <span>{ props.children.clone() }</span>
            { close.unwrap_or_default() }
        </div>
    }
}
