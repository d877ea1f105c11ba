use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    /// Small inline variant for buttons.
    #[prop_or_default]
    pub small: bool,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    if props.small {
        html! { <span class="spinner spinner-sm" role="status"></span> }
    } else {
        html! {
            <div class="spinner-wrap">
                <span class="spinner" role="status"></span>
            </div>
        }
    }
}
