use leptos::prelude::*;

/// Yes / no dialog in front of a destructive or bulk action.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] busy: Signal<bool>,
    title: &'static str,
    #[prop(into)] message: Signal<String>,
    confirm_label: &'static str,
    busy_label: &'static str,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <div class="modal card" role="alertdialog">
                    <h2>{title}</h2>
                    <p class="modal-message">{move || message.get()}</p>
                    <div class="modal-actions">
                        <button
                            class="btn btn-secondary"
                            disabled=move || busy.get()
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </button>
                        <button
                            class="btn btn-danger"
                            disabled=move || busy.get()
                            on:click=move |_| on_confirm.run(())
                        >
                            {move || if busy.get() { busy_label } else { confirm_label }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
