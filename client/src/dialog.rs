use hexmap_shared::Expansion;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::{ExpandDialogOpen, Session};

/// Parse a side delta the way the number inputs report it; blanks count as 0.
fn parse_delta(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
fn SideInput(label: &'static str, value: RwSignal<i32>) -> impl IntoView {
    let on_input = move |e: web_sys::Event| {
        if let Some(input) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            value.set(parse_delta(&input.value()));
        }
    };

    view! {
        <div style="display: flex; align-items: center; justify-content: space-between;">
            <label>{label}</label>
            <input
                type="number"
                min="0"
                prop:value=move || value.get().to_string()
                on:input=on_input
                style="width: 80px; padding: 4px 8px; border: 1px solid #d1d5db; border-radius: 4px;"
            />
        </div>
    }
}

/// Modal that widens the declared extent by per-side amounts.
#[component]
pub fn ExpandDialog() -> impl IntoView {
    let Session(session) = expect_context();
    let ExpandDialogOpen(open) = expect_context();
    let defaults = Expansion::default();
    let north = RwSignal::new(defaults.north);
    let south = RwSignal::new(defaults.south);
    let east = RwSignal::new(defaults.east);
    let west = RwSignal::new(defaults.west);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_expand = move |_| {
        let by = Expansion {
            north: north.get_untracked(),
            south: south.get_untracked(),
            east: east.get_untracked(),
            west: west.get_untracked(),
        };
        let Some(mut next) = session.try_get_untracked() else {
            return;
        };
        match next.expand(by) {
            Ok(()) => {
                session.set(next);
                open.set(false);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <div style="position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center; z-index: 50;">
            <div style="background: #fff; border-radius: 8px; padding: 24px; width: 384px;">
                <h3 style="font-size: 1.125rem; font-weight: 600; margin: 0 0 16px;">"Expand Map"</h3>
                <div style="display: flex; flex-direction: column; gap: 12px;">
                    <SideInput label="North:" value=north />
                    <SideInput label="South:" value=south />
                    <SideInput label="East:" value=east />
                    <SideInput label="West:" value=west />
                </div>
                {move || error.get().map(|msg| view! {
                    <div style="margin-top: 12px; font-size: 0.8rem; color: #ef4444;">{msg}</div>
                })}
                <div style="display: flex; gap: 8px; margin-top: 24px;">
                    <button
                        style="flex: 1; padding: 8px 16px; background: #3b82f6; color: #fff; border: none; border-radius: 4px; cursor: pointer;"
                        on:click=on_expand
                    >
                        "Expand"
                    </button>
                    <button
                        style="flex: 1; padding: 8px 16px; background: #e5e7eb; border: none; border-radius: 4px; cursor: pointer;"
                        on:click=move |_| open.set(false)
                    >
                        "Cancel"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::parse_delta;

    #[test]
    fn blank_or_garbage_delta_is_zero() {
        assert_eq!(parse_delta(""), 0);
        assert_eq!(parse_delta("abc"), 0);
        assert_eq!(parse_delta(" 7 "), 7);
        assert_eq!(parse_delta("-3"), -3);
    }
}
