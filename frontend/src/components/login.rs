use crate::auth::{login, use_auth};
use crate::error::{ApiError, AuthError};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 手动登录失败时展示给用户的提示
fn login_error_message(err: &AuthError) -> String {
    match err {
        AuthError::MissingCredential => "Please paste a token first".to_string(),
        AuthError::Verification(e) => match e.server_message() {
            Some(message) => format!("Login failed: {}", message),
            None => match e {
                ApiError::Status { .. } => "Login failed: the token was rejected".to_string(),
                _ => "Login failed: could not reach the backend".to_string(),
            },
        },
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let token_issuer_url = auth.api().token_issuer_url();

    let (token_input, set_token_input) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let can_submit = move || !token_input.with(|t| t.trim().is_empty()) && !is_submitting.get();

    // Already-authenticated visitors are redirected by the router guard,
    // including right after a successful submit below.
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let token = token_input.with_untracked(|t| t.trim().to_string());
        if token.is_empty() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match login(&auth, token).await {
                Ok(user) => log_info!("[Login] Token accepted for {}", user.greeting_name()),
                Err(e) => {
                    log_error!("[Login] Login failed: {}", e);
                    set_error_msg.try_set(Some(login_error_message(&e)));
                }
            }
            // the page may already be unmounted by the redirect
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-xl">
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body text-center gap-6" on:submit=on_submit>
                        <h1 class="text-5xl font-bold text-success">"Tracklytics"</h1>

                        <div class="space-y-3">
                            <p>"Step 1: Get your token"</p>
                            <a
                                href=token_issuer_url
                                target="_blank"
                                rel="noopener noreferrer"
                                class="btn btn-success"
                            >
                                "Get Token from Backend"
                            </a>
                        </div>

                        <div class="space-y-3">
                            <label class="block" for="token">
                                "Step 2: Paste your JWT token here"
                            </label>
                            <input
                                id="token"
                                type="text"
                                placeholder="Paste JWT token here..."
                                on:input=move |ev| set_token_input.set(event_target_value(&ev))
                                prop:value=token_input
                                class="input input-bordered w-full"
                            />
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>
                            <button type="submit" class="btn btn-primary w-full" disabled=move || !can_submit()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Verifying..." }.into_any()
                                } else {
                                    "Login with Token".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_surfaced() {
        let err = AuthError::Verification(ApiError::Status {
            status: 401,
            message: Some("invalid token".to_string()),
        });
        assert_eq!(login_error_message(&err), "Login failed: invalid token");
    }

    #[test]
    fn rejection_without_message() {
        let err = AuthError::Verification(ApiError::Status {
            status: 403,
            message: None,
        });
        assert_eq!(login_error_message(&err), "Login failed: the token was rejected");
    }

    #[test]
    fn transport_failure() {
        let err = AuthError::Verification(ApiError::Network("refused".to_string()));
        assert_eq!(
            login_error_message(&err),
            "Login failed: could not reach the backend"
        );
    }
}
