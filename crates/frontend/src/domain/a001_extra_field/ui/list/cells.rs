use super::display::format_column;
use super::view_model::ExtraFieldsViewModel;
use crate::domain::a001_extra_field::editor::dispatch::column_spec;
use crate::domain::a001_extra_field::editor::{Column, Draft, DraftValue, InputKind};
use crate::shared::date_utils::{parse_datetime_local, to_datetime_local};
use crate::shared::text_format::{linkify, TextSegment};
use contracts::domain::a001_extra_field::{ExtraField, ExtraFieldType};
use leptos::prelude::*;
use thaw::*;

/// Text with http(s) URLs rendered as links
#[component]
pub fn LinkifiedText(#[prop(into)] text: String) -> impl IntoView {
    linkify(&text)
        .into_iter()
        .map(|segment| match segment {
            TextSegment::Plain(s) => view! { <span>{s}</span> }.into_any(),
            TextSegment::Link(url) => {
                let href = url.clone();
                view! {
                    <a href=href target="_blank" rel="noopener noreferrer">{url}</a>
                }
                .into_any()
            }
        })
        .collect_view()
}

#[component]
pub fn ReadCell(field: ExtraField, column: Column) -> impl IntoView {
    let text = format_column(&field, column);
    let content = match column {
        Column::Key => view! { <code>{text}</code> }.into_any(),
        Column::FieldType => view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>{text}</Badge>
        }
        .into_any(),
        _ => view! { <LinkifiedText text=text /> }.into_any(),
    };

    view! {
        <TableCell>
            <TableCellLayout>{content}</TableCellLayout>
        </TableCell>
    }
}

/// Cell of the row under edit. The input is picked from the dispatch table
/// and re-picked whenever the draft's type or multi-choice flag changes.
#[component]
pub fn EditCell(vm: ExtraFieldsViewModel, column: Column) -> impl IntoView {
    let editor = vm.editor;
    let is_new = editor.with_untracked(|e| e.is_editing_new());
    let shape = Memo::new(move |_| {
        editor.with(|e| {
            e.draft()
                .map(|d| (d.field_type, d.multi_choice))
                .unwrap_or_default()
        })
    });
    let error = move || editor.with(|e| e.error_for(column).map(str::to_string));

    view! {
        <TableCell>
            <TableCellLayout>
                <div class="extra-field-cell" class:extra-field-cell--invalid=move || error().is_some()>
                    {move || {
                        let (field_type, multi_choice) = shape.get();
                        let spec = column_spec(column, field_type, multi_choice, is_new);
                        if spec.editable {
                            input_view(vm, column, spec.input)
                        } else {
                            view! { <span>{read_draft(vm, fixed_text(column))}</span> }.into_any()
                        }
                    }}
                    {move || error().map(|message| view! {
                        <div class="extra-field-cell__error">{message}</div>
                    })}
                </div>
            </TableCellLayout>
        </TableCell>
    }
}

/// Text of a column that cannot be edited in the current draft
fn fixed_text(column: Column) -> fn(&Draft) -> String {
    match column {
        Column::Key => |d| d.key.clone(),
        Column::FieldType => |d| d.field_type.display_name().to_string(),
        _ => |_| String::new(),
    }
}

fn read_draft<T: Default + 'static>(
    vm: ExtraFieldsViewModel,
    get: fn(&Draft) -> T,
) -> impl Fn() -> T + Copy + Send + Sync + 'static {
    move || vm.editor.with(|e| e.draft().map(get).unwrap_or_default())
}

fn text_accessors(column: Column) -> (fn(&Draft) -> String, fn(&mut Draft, String)) {
    match column {
        Column::Key => (|d| d.key.clone(), |d, v| d.key = v),
        Column::Name => (|d| d.name.clone(), |d, v| d.name = v),
        Column::Order => (|d| d.order.clone(), |d, v| d.order = v),
        Column::Unit => (|d| d.unit.clone(), |d, v| d.unit = v),
        _ => (
            |d| d.default_value.as_input_text(),
            |d, v| d.default_value = DraftValue::Text(v),
        ),
    }
}

/// Draft value of a free-text default input. Text is kept even when empty
/// (stored as `""`); a blank numeric or range input means no value.
fn default_from_text(input: InputKind, text: String) -> DraftValue {
    match input {
        InputKind::Integer | InputKind::Float | InputKind::IntegerRange | InputKind::FloatRange
            if text.trim().is_empty() =>
        {
            DraftValue::Empty
        }
        InputKind::Integer | InputKind::Float => DraftValue::Number(text),
        InputKind::IntegerRange | InputKind::FloatRange => DraftValue::Range(text),
        _ => DraftValue::Text(text),
    }
}

fn input_view(vm: ExtraFieldsViewModel, column: Column, input: InputKind) -> AnyView {
    match (column, input) {
        (Column::DefaultValue, InputKind::Text)
        | (Column::DefaultValue, InputKind::Integer)
        | (Column::DefaultValue, InputKind::Float)
        | (Column::DefaultValue, InputKind::IntegerRange)
        | (Column::DefaultValue, InputKind::FloatRange) => {
            let placeholder = match input {
                InputKind::IntegerRange | InputKind::FloatRange => "min - max",
                _ => "",
            };
            let inputmode = match input {
                InputKind::Integer => "numeric",
                InputKind::Float | InputKind::FloatRange => "decimal",
                _ => "text",
            };
            view! {
                <input
                    type="text"
                    class="form__input"
                    inputmode=inputmode
                    placeholder=placeholder
                    prop:value=read_draft(vm, |d| d.default_value.as_input_text())
                    on:input=move |ev| {
                        let value = default_from_text(input, event_target_value(&ev));
                        vm.update_draft(column, |d| d.default_value = value);
                    }
                />
            }
            .into_any()
        }
        (Column::DefaultValue, InputKind::DateTime) => view! {
            <input
                type="datetime-local"
                step="1"
                class="form__input"
                prop:value=read_draft(vm, |d| match &d.default_value {
                    DraftValue::DateTime(dt) => to_datetime_local(dt),
                    _ => String::new(),
                })
                on:input=move |ev| {
                    let value = parse_datetime_local(&event_target_value(&ev))
                        .map(DraftValue::DateTime)
                        .unwrap_or_default();
                    vm.update_draft(column, |d| d.default_value = value);
                }
            />
        }
        .into_any(),
        (Column::DefaultValue, InputKind::Checkbox) => view! {
            <input
                type="checkbox"
                prop:checked=read_draft(vm, |d| d.default_value == DraftValue::Checkbox(true))
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    vm.update_draft(column, |d| d.default_value = DraftValue::Checkbox(checked));
                }
            />
        }
        .into_any(),
        (Column::DefaultValue, InputKind::Select) => view! {
            <select
                class="form__select"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    vm.update_draft(column, |d| {
                        d.default_value = if value.is_empty() {
                            DraftValue::Empty
                        } else {
                            DraftValue::Choice(value)
                        };
                    });
                }
            >
                {move || {
                    let (choices, current) = vm.editor.with(|e| {
                        e.draft()
                            .map(|d| (d.choices.clone(), d.default_value.as_input_text()))
                            .unwrap_or_default()
                    });
                    let none_selected = current.is_empty();
                    let options = choices
                        .into_iter()
                        .map(|choice| {
                            let selected = choice == current;
                            let value = choice.clone();
                            view! { <option value=value selected=selected>{choice}</option> }
                        })
                        .collect_view();
                    view! {
                        <option value="" selected=none_selected>"(none)"</option>
                        {options}
                    }
                }}
            </select>
        }
        .into_any(),
        (Column::DefaultValue, InputKind::MultiSelect) => view! {
            <div class="extra-field-choices">
                {move || {
                    let (choices, selected) = vm.editor.with(|e| {
                        e.draft()
                            .map(|d| {
                                let selected: Vec<String> = d
                                    .default_value
                                    .choice_values()
                                    .into_iter()
                                    .map(str::to_string)
                                    .collect();
                                (d.choices.clone(), selected)
                            })
                            .unwrap_or_default()
                    });
                    choices
                        .into_iter()
                        .map(|choice| {
                            let checked = selected.contains(&choice);
                            let value = choice.clone();
                            view! {
                                <label class="extra-field-choices__item">
                                    <input
                                        type="checkbox"
                                        prop:checked=checked
                                        on:change=move |ev| {
                                            let on = event_target_checked(&ev);
                                            let value = value.clone();
                                            vm.update_draft(column, move |d| {
                                                d.toggle_default_choice(&value, on)
                                            });
                                        }
                                    />
                                    {choice}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        }
        .into_any(),
        (_, InputKind::FieldTypeSelect) => view! {
            <select
                class="form__select"
                on:change=move |ev| {
                    if let Some(field_type) = ExtraFieldType::from_code(&event_target_value(&ev)) {
                        vm.update_draft(column, |d| d.set_field_type(field_type));
                    }
                }
            >
                {move || {
                    let current = read_draft(vm, |d| d.field_type)();
                    ExtraFieldType::all()
                        .into_iter()
                        .map(|field_type| view! {
                            <option value=field_type.code() selected={field_type == current}>
                                {field_type.display_name()}
                            </option>
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any(),
        (_, InputKind::ChoiceList) => view! {
            <textarea
                class="form__textarea"
                rows="3"
                placeholder="One choice per line"
                prop:value=read_draft(vm, |d| d.choices_text())
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    vm.update_draft(column, |d| d.set_choices_text(&text));
                }
            ></textarea>
        }
        .into_any(),
        (Column::MultiChoice, InputKind::Checkbox) => view! {
            <input
                type="checkbox"
                prop:checked=read_draft(vm, |d| d.multi_choice)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    vm.update_draft(column, |d| d.set_multi_choice(checked));
                }
            />
        }
        .into_any(),
        _ => {
            let (get, set) = text_accessors(column);
            let inputmode = if input == InputKind::Integer { "numeric" } else { "text" };
            view! {
                <input
                    type="text"
                    class="form__input"
                    inputmode=inputmode
                    prop:value=read_draft(vm, get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.update_draft(column, |d| set(d, value));
                    }
                />
            }
            .into_any()
        }
    }
}
