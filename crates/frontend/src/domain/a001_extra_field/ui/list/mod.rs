mod cells;
mod display;
mod view_model;

use crate::domain::a001_extra_field::editor::{Column, EditorState};
use crate::shared::icons::icon;
use crate::shared::page_frame::{page_id, PageFrame, PAGE_CAT_LIST};
use cells::{EditCell, ReadCell};
use contracts::domain::a001_extra_field::{EntityType, ExtraField};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::*;
pub use view_model::ExtraFieldsViewModel;

/// Route `/settings/extra/:entity_type`
#[component]
pub fn ExtraFieldsPage() -> impl IntoView {
    let params = use_params_map();
    let entity_type = Memo::new(move |_| {
        params
            .read()
            .get("entity_type")
            .and_then(|code| EntityType::from_code(&code))
    });

    view! {
        {move || match entity_type.get() {
            // a new view model per entity type, so navigation drops any draft
            Some(entity_type) => view! { <ExtraFieldsList entity_type=entity_type /> }.into_any(),
            None => view! {
                <div class="page">
                    <EntityTabs current=None />
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__text">"Unknown entity type"</span>
                    </div>
                </div>
            }
            .into_any(),
        }}
    }
}

#[component]
fn EntityTabs(current: Option<EntityType>) -> impl IntoView {
    view! {
        <nav class="entity-tabs">
            {EntityType::all()
                .into_iter()
                .map(|entity_type| {
                    let active = current == Some(entity_type);
                    view! {
                        <a
                            class="entity-tabs__tab"
                            class:entity-tabs__tab--active=active
                            href=format!("/settings/extra/{}", entity_type.code())
                        >
                            {entity_type.display_name()}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ExtraFieldsList(entity_type: EntityType) -> impl IntoView {
    let vm = ExtraFieldsViewModel::new(entity_type);
    let editor = vm.editor;
    vm.load();

    // Only row identity and stored values re-render the table; draft edits
    // are picked up by the cells.
    let rows = Memo::new(move |_| editor.with(|e| e.rows()));
    let is_idle = move || editor.with(|e| *e.state() == EditorState::Idle);
    let message = move || editor.with(|e| e.message().map(str::to_string));

    view! {
        <PageFrame page_id=page_id(&format!("extra_fields_{}", entity_type.code()), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{format!("Extra fields: {}", entity_type.display_name())}</h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Show when=move || editor.with(|e| e.can_add())>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| vm.add_command()
                            >
                                {icon("plus")}
                                " Add field"
                            </Button>
                        </Show>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || vm.loading.get() || !is_idle())
                            on_click=move |_| vm.load()
                        >
                            {icon("refresh")}
                            " Refresh"
                        </Button>
                    </Flex>
                </div>
            </div>

            <EntityTabs current=Some(entity_type) />

            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            {move || message().map(|m| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{m}</span>
                </div>
            })}

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            {Column::all()
                                .into_iter()
                                .map(|column| view! {
                                    <TableHeaderCell>{column.label()}</TableHeaderCell>
                                })
                                .collect_view()}
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || rows
                            .get()
                            .into_iter()
                            .map(|field| view! { <ExtraFieldRow vm=vm field=field /> })
                            .collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || vm.loading.get() && rows.with(|r| r.is_empty())>
                    <div class="page__placeholder">"Loading..."</div>
                </Show>
                <Show when=move || !vm.loading.get() && rows.with(|r| r.is_empty())>
                    <div class="page__placeholder">"No extra fields yet"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[component]
fn ExtraFieldRow(vm: ExtraFieldsViewModel, field: ExtraField) -> impl IntoView {
    let editor = vm.editor;
    let key = field.key.clone();
    let editing = Memo::new(move |_| editor.with(|e| e.is_row_editing(&key)));

    move || {
        if editing.get() {
            view! { <EditRow vm=vm /> }.into_any()
        } else {
            view! { <ReadRow vm=vm field=field.clone() /> }.into_any()
        }
    }
}

#[component]
fn ReadRow(vm: ExtraFieldsViewModel, field: ExtraField) -> impl IntoView {
    let editor = vm.editor;
    let key_for_edit = field.key.clone();
    let key_for_delete = field.key.clone();
    let key_for_check = field.key.clone();
    let cells = Column::all()
        .into_iter()
        .map(|column| view! { <ReadCell field=field.clone() column=column /> })
        .collect_view();

    view! {
        <TableRow>
            {cells}
            <TableCell>
                <TableCellLayout>
                    <Flex gap=FlexGap::Small>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || editor.with(|e| *e.state() != EditorState::Idle))
                            on_click=move |_| vm.edit_command(&key_for_edit)
                        >
                            {icon("edit")}
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || !editor.with(|e| e.can_delete(&key_for_check)))
                            on_click=move |_| vm.delete_command(key_for_delete.clone())
                        >
                            {icon("delete")}
                        </Button>
                    </Flex>
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
}

#[component]
fn EditRow(vm: ExtraFieldsViewModel) -> impl IntoView {
    let editor = vm.editor;
    let submitting = Signal::derive(move || editor.with(|e| e.is_submitting()));
    let cells = Column::all()
        .into_iter()
        .map(|column| view! { <EditCell vm=vm column=column /> })
        .collect_view();

    view! {
        <TableRow class="table__row--editing">
            {cells}
            <TableCell>
                <TableCellLayout>
                    <Flex gap=FlexGap::Small>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Primary
                            disabled=submitting
                            on_click=move |_| vm.save_command()
                        >
                            {icon("save")}
                            {move || if submitting.get() { " Saving..." } else { " Save" }}
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            disabled=submitting
                            on_click=move |_| vm.cancel_command()
                        >
                            {icon("cancel")}
                            " Cancel"
                        </Button>
                    </Flex>
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
}
