//! Общие элементы списков: поиск с debounce и подсветка совпадений.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Разбивка текста на сегменты (срез, попал ли в совпадение).
///
/// Позиции ищутся в lowercase-копии, но lowercase меняет длину в байтах
/// ('İ' U+0130 -> "i\u{307}"), поэтому оригинал режется только по границам
/// его собственных символов через обратную таблицу байтовых позиций.
fn match_segments<'a>(text: &'a str, query_lower: &str) -> Vec<(&'a str, bool)> {
    let mut lowered = String::new();
    // Байт lowered -> начало исходного символа
    let mut back: Vec<usize> = Vec::new();
    for (orig_idx, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            let from = lowered.len();
            lowered.push(lc);
            back.extend(std::iter::repeat(orig_idx).take(lowered.len() - from));
        }
    }

    let next_boundary = |idx: usize| -> usize {
        text[idx..]
            .chars()
            .next()
            .map_or(text.len(), |c| idx + c.len_utf8())
    };

    let mut segments: Vec<(&str, bool)> = Vec::new();
    let mut emitted = 0usize;
    let mut search_from = 0usize;

    while let Some(pos) = lowered[search_from..].find(query_lower) {
        let start = search_from + pos;
        let end = start + query_lower.len();
        search_from = end;

        // Совпадение расширяется до границ символов оригинала
        let orig_start = back[start].max(emitted);
        let orig_end = next_boundary(back[end - 1]);
        if orig_end <= orig_start {
            continue;
        }

        if orig_start > emitted {
            segments.push((&text[emitted..orig_start], false));
        }
        segments.push((&text[orig_start..orig_end], true));
        emitted = orig_end;
    }

    if emitted < text.len() {
        segments.push((&text[emitted..], false));
    }
    segments
}

/// Подсветка вхождений запроса в тексте (без учёта регистра).
pub fn highlight_matches(text: &str, query: &str) -> AnyView {
    let query = query.trim();
    if query.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let segments = match_segments(text, &query.to_lowercase());
    if !segments.iter().any(|(_, hit)| *hit) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let parts: Vec<AnyView> = segments
        .into_iter()
        .map(|(part, hit)| {
            if hit {
                view! { <mark class="search-match">{part.to_string()}</mark> }.into_any()
            } else {
                view! { <span>{part.to_string()}</span> }.into_any()
            }
        })
        .collect();

    view! { <>{parts}</> }.into_any()
}

/// Поле поиска с debounce и кнопкой очистки.
#[component]
pub fn SearchInput(
    /// Текущее значение (после debounce)
    #[prop(into)]
    value: Signal<String>,
    /// Callback обновления значения
    on_change: Callback<String>,
    /// Placeholder
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное значение input до срабатывания debounce
    let (input_value, set_input_value) = signal(String::new());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        if let Some(timeout_id) = debounce_timeout.get_value() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout_id);
            }
        }

        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        if let Ok(timeout_id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            300,
        ) {
            debounce_timeout.set_value(Some(timeout_id));
        }
        closure.forget();
    };

    let clear = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="form-control"
                placeholder={placeholder}
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            {move || if !input_value.get().is_empty() || !value.get().is_empty() {
                view! {
                    <button class="search-input__clear" on:click=clear title="Очистить">
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
