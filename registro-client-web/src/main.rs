use registro_core::{today_utc, Branch, Field, InterestedDomain};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

mod api;
mod form;
mod users;

use api::SubmitError;
use form::{FormAction, FormState};
use users::ListState;

#[derive(Clone, PartialEq)]
enum Notice {
    Empty,
    Success,
    Failure(String),
}

#[derive(Properties, PartialEq)]
struct FieldProps {
    field: Field,
    value: String,
    error: Option<String>,
    on_input: Callback<(Field, String)>,
    on_blur: Callback<Field>,
}

/// Un campo del form: input, select o textarea a seconda del tipo di dato.
#[function_component(FormField)]
fn form_field(props: &FieldProps) -> Html {
    let field = props.field;
    let oninput = {
        let cb = props.on_input.clone();
        move |e: InputEvent| cb.emit((field, e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let onchange_select = {
        let cb = props.on_input.clone();
        move |e: Event| cb.emit((field, e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let oninput_area = {
        let cb = props.on_input.clone();
        move |e: InputEvent| cb.emit((field, e.target_unchecked_into::<HtmlTextAreaElement>().value()))
    };
    let onblur = {
        let cb = props.on_blur.clone();
        move |_: FocusEvent| cb.emit(field)
    };
    let options = |values: Vec<&'static str>| -> Html {
        html! {
            <select id={field.as_str()} name={field.as_str()} onchange={onchange_select.clone()} onblur={onblur.clone()}>
                <option value="" selected={props.value.is_empty()}>{ format!("Select {}", field.label()) }</option>
                { for values.into_iter().map(|v| html! {
                    <option value={v} selected={props.value == v}>{ v }</option>
                }) }
            </select>
        }
    };

    let control = match field {
        Field::BranchName => options(Branch::ALL.iter().map(|b| b.as_str()).collect()),
        Field::InterestedDomain => options(InterestedDomain::ALL.iter().map(|d| d.as_str()).collect()),
        Field::Address => html! {
            <textarea id={field.as_str()} name={field.as_str()} rows="3"
                value={props.value.clone()} oninput={oninput_area} onblur={onblur.clone()} />
        },
        _ => {
            let kind = match field {
                Field::Email => "email",
                Field::Password => "password",
                Field::Dob => "date",
                _ => "text",
            };
            html! {
                <input id={field.as_str()} name={field.as_str()} type={kind}
                    value={props.value.clone()} oninput={oninput} onblur={onblur.clone()} />
            }
        }
    };

    html! {
        <div class="field">
            <label for={field.as_str()}>{ field.label() }</label>
            { control }
            if let Some(error) = &props.error {
                <p class="error">{ error.clone() }</p>
            }
        </div>
    }
}

#[function_component(RegistrationForm)]
fn registration_form() -> Html {
    let form = use_reducer(FormState::default);
    let submitting = use_state(|| false);
    let notice = use_state(|| Notice::Empty);
    let today = today_utc();

    let on_input = {
        let form = form.dispatcher();
        Callback::from(move |(field, value): (Field, String)| form.dispatch(FormAction::Set(field, value)))
    };
    let on_blur = {
        let form = form.dispatcher();
        Callback::from(move |field: Field| form.dispatch(FormAction::Touch(field)))
    };

    let onsubmit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let notice = notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            form.dispatch(FormAction::TouchAll);
            // stesse regole del server: se il form non è valido non si invia nulla
            let Ok(candidate) = form.checked(today_utc()) else {
                return;
            };
            submitting.set(true);
            notice.set(Notice::Empty);

            let form = form.dispatcher();
            let submitting = submitting.clone();
            let notice = notice.clone();
            yew::platform::spawn_local(async move {
                match api::register(api::API_URL, &candidate).await {
                    Ok(_) => {
                        notice.set(Notice::Success);
                        form.dispatch(FormAction::Reset);
                    }
                    Err(error) => {
                        if let SubmitError::Rejected { fields, .. } = &error {
                            form.dispatch(FormAction::ServerRejected(fields.clone()));
                        }
                        notice.set(Notice::Failure(error.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <section style="font-family: system-ui, Arial, sans-serif; padding: 2rem; max-width: 40rem;">
            <h1>{"Registration Form"}</h1>
            <p>{"Join our community today"}</p>
            {
                match &*notice {
                    Notice::Empty => html! {},
                    Notice::Success => html! { <div class="notice ok">{"Form submitted successfully!"}</div> },
                    Notice::Failure(msg) => html! { <div class="notice error">{ msg.clone() }</div> },
                }
            }
            <form {onsubmit}>
                { for Field::ALL.into_iter().map(|field| html! {
                    <FormField
                        key={field.as_str()}
                        {field}
                        value={form.value(field).to_string()}
                        error={form.error_for(field, today)}
                        on_input={on_input.clone()}
                        on_blur={on_blur.clone()}
                    />
                }) }
                <button type="submit" disabled={*submitting}>
                    { if *submitting { "Submitting..." } else { "Submit" } }
                </button>
            </form>
        </section>
    }
}

/// Lista degli utenti registrati, nell'ordine restituito dal server.
#[function_component(UsersList)]
fn users_list() -> Html {
    let state = use_state(|| ListState::Loading);
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                state.set(ListState::from(api::list_users(api::API_URL).await));
            });
            || ()
        });
    }

    let body = match &*state {
        ListState::Loading => html! { <p>{"Loading users..."}</p> },
        ListState::Failed(msg) => html! {
            <div class="notice error">
                <h2>{"Error"}</h2>
                <p>{ msg.clone() }</p>
            </div>
        },
        ListState::Loaded(list) if list.is_empty() => html! {
            <div class="empty">
                <h3>{"No users found"}</h3>
                <p>{"No users registered yet"}</p>
            </div>
        },
        ListState::Loaded(list) => html! {
            <>
                <p class="summary">{ users::summary(list) }</p>
                <div class="users">
                    { for list.iter().map(|user| html! {
                        <article key={user.id.clone()} class="user">
                            <h3>{ users::full_name(user) }</h3>
                            <p>{ user.email.clone() }</p>
                            <p>{ format!("ID: {}", user.id_number) }</p>
                            <p>{ format!("DOB: {}", user.dob) }</p>
                            <p>{ user.address.clone() }</p>
                            <span class="tag">{ user.branch_name.as_str() }</span>
                            <span class="tag">{ user.interested_domain.as_str() }</span>
                        </article>
                    }) }
                </div>
            </>
        },
    };

    html! {
        <section style="font-family: system-ui, Arial, sans-serif; padding: 2rem;">
            <h1>{"User Management"}</h1>
            <p>{"View all registered users in the system"}</p>
            { body }
        </section>
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Register,
    Users,
}

#[function_component(App)]
fn app() -> Html {
    let page = use_state(|| Page::Register);
    let go = |target: Page| {
        let page = page.clone();
        Callback::from(move |_: MouseEvent| page.set(target))
    };

    html! {
        <>
            <nav style="font-family: system-ui, Arial, sans-serif; padding: 1rem 2rem;">
                <button onclick={go(Page::Register)} disabled={*page == Page::Register}>{"Register"}</button>
                <button onclick={go(Page::Users)} disabled={*page == Page::Users}>{"Users"}</button>
            </nav>
            {
                match *page {
                    Page::Register => html! { <RegistrationForm /> },
                    Page::Users => html! { <UsersList /> },
                }
            }
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
