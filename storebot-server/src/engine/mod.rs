//! Dialog engine
//!
//! The state machine behind every conversation. One inbound event goes
//! through the same path every time:
//!
//! 1. look up (or create) the sender's session and lock it, so events from
//!    one user are handled strictly in order;
//! 2. upsert the user row, refreshing profile fields and the admin flag;
//! 3. commands (`/start`, `/cancel`) reset the dialog from any state;
//! 4. otherwise the current [`DialogState`] decides which inputs it
//!    accepts; everything else gets a gentle "use the buttons" screen;
//! 5. errors never escape: [`DialogEngine::error_screen`] turns each
//!    [`DialogError`] into a reply and, where needed, a safe state.

pub mod error;
pub mod token;
pub mod validate;

#[cfg(test)]
mod tests;

pub use error::{DialogError, DialogResult};
pub use token::ActionToken;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, error, info, warn};

use shared::event::{EventKind, InboundEvent};
use shared::models::User;
use shared::screen::Screen;

use crate::db::{DbService, RepoError, repository};
use crate::notify::{AdminNotifier, OrderNotice};
use crate::render;
use crate::session::{DialogSession, DialogState, OrderDraft, ProductDraft, SessionManager};

/// How many orders the admin feed shows.
const RECENT_ORDERS: i64 = 10;

#[derive(Debug, Clone)]
pub struct DialogEngine {
    db: DbService,
    sessions: SessionManager,
    admin_ids: Arc<HashSet<i64>>,
    notifier: AdminNotifier,
}

impl DialogEngine {
    pub fn new(
        db: DbService,
        sessions: SessionManager,
        admin_ids: Arc<HashSet<i64>>,
        notifier: AdminNotifier,
    ) -> Self {
        Self {
            db,
            sessions,
            admin_ids,
            notifier,
        }
    }

    /// Handle one event and produce the reply screen. Never fails; faults
    /// collapse into an apology screen and a reset session.
    pub async fn process(&self, event: InboundEvent) -> Screen {
        let handle = self.sessions.session(event.user_id);
        let mut session = handle.lock().await;

        if let Err(e) = self.register_user(&event).await {
            error!(user_id = event.user_id, "failed to register user: {e}");
            session.reset();
            return render::fault();
        }

        match self.step(&mut session, &event).await {
            Ok(screen) => screen,
            Err(e) => self.error_screen(&mut session, &event, e),
        }
    }

    // ========== Users and permissions ==========

    async fn register_user(&self, event: &InboundEvent) -> DialogResult<()> {
        let is_admin = self.admin_ids.contains(&event.user_id);
        repository::user::upsert(
            &self.db.pool,
            event.user_id,
            event.sender.username.as_deref(),
            event.sender.first_name.as_deref(),
            event.sender.last_name.as_deref(),
            is_admin,
        )
        .await?;
        Ok(())
    }

    /// Allow-list first, then the persisted flag.
    async fn is_admin(&self, user_id: i64) -> DialogResult<bool> {
        if self.admin_ids.contains(&user_id) {
            return Ok(true);
        }
        Ok(repository::user::is_admin(&self.db.pool, user_id).await?)
    }

    async fn ensure_admin(&self, user_id: i64) -> DialogResult<()> {
        if self.is_admin(user_id).await? {
            Ok(())
        } else {
            Err(DialogError::Unauthorized)
        }
    }

    /// The row must exist here: every event upserts it first.
    async fn require_user(&self, user_id: i64) -> DialogResult<User> {
        repository::user::find(&self.db.pool, user_id)
            .await?
            .ok_or_else(|| DialogError::Internal(anyhow!("user {user_id} missing after upsert")))
    }

    // ========== Dispatch ==========

    fn action(event: &InboundEvent) -> Option<ActionToken> {
        match &event.kind {
            EventKind::Button(raw) => ActionToken::parse(raw),
            _ => None,
        }
    }

    async fn step(&self, session: &mut DialogSession, event: &InboundEvent) -> DialogResult<Screen> {
        if let EventKind::Command(name) = &event.kind {
            return self.handle_command(session, event, name).await;
        }

        let state = session.state.clone();
        match state {
            DialogState::MainMenu => self.in_main_menu(session, event).await,
            DialogState::Catalog => self.in_catalog(session, event).await,
            DialogState::CategoryView { category, page } => {
                self.in_category_view(session, event, category, page).await
            }
            DialogState::ProductView { product_id, category } => {
                self.in_product_view(session, event, product_id, category).await
            }
            DialogState::ConfirmDelete { product_id, category } => {
                self.in_confirm_delete(session, event, product_id, category).await
            }
            DialogState::CartView => self.in_cart_view(session, event).await,
            DialogState::OrderPhone { draft } => self.in_order_phone(session, event, draft).await,
            DialogState::OrderAddress { draft } => {
                self.in_order_address(session, event, draft).await
            }
            DialogState::OrderComment { draft } => {
                self.in_order_comment(session, event, draft).await
            }
            DialogState::Profile => self.in_profile(session, event).await,
            DialogState::AdminMenu => self.in_admin_menu(session, event).await,
            DialogState::WaitingName { draft } => self.in_waiting_name(session, event, draft).await,
            DialogState::WaitingDescription { draft } => {
                self.in_waiting_description(session, event, draft).await
            }
            DialogState::WaitingPrice { draft } => {
                self.in_waiting_price(session, event, draft).await
            }
            DialogState::WaitingCategory { draft } => {
                self.in_waiting_category(session, event, draft).await
            }
            DialogState::WaitingImages { draft } => {
                self.in_waiting_images(session, event, draft).await
            }
        }
    }

    async fn handle_command(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        name: &str,
    ) -> DialogResult<Screen> {
        match name.trim_start_matches('/') {
            "start" => {
                session.reset();
                let user = self.require_user(event.user_id).await?;
                info!(user_id = event.user_id, "👋 dialog started");
                Ok(render::welcome(
                    &user.display_name(),
                    self.is_admin(event.user_id).await?,
                ))
            }
            "cancel" => {
                debug!(
                    user_id = event.user_id,
                    state = session.state.name(),
                    "dialog cancelled"
                );
                session.reset();
                Ok(render::cancelled(self.is_admin(event.user_id).await?))
            }
            _ => self.reject(session, event),
        }
    }

    fn reject(&self, session: &DialogSession, event: &InboundEvent) -> DialogResult<Screen> {
        debug!(
            user_id = event.user_id,
            state = session.state.name(),
            "unexpected event for state"
        );
        Ok(render::not_available())
    }

    // ========== Shared navigation ==========

    async fn go_main(&self, session: &mut DialogSession, user_id: i64) -> DialogResult<Screen> {
        session.reset();
        Ok(render::main_menu(self.is_admin(user_id).await?))
    }

    async fn open_catalog(&self, session: &mut DialogSession) -> DialogResult<Screen> {
        let categories = repository::product::categories(&self.db.pool).await?;
        session.state = DialogState::Catalog;
        Ok(render::category_list(&categories))
    }

    async fn open_category(
        &self,
        session: &mut DialogSession,
        category: String,
        page: usize,
    ) -> DialogResult<Screen> {
        let products =
            repository::product::list_active_by_category(&self.db.pool, &category).await?;
        let pages = products.len().div_ceil(render::PAGE_SIZE).max(1);
        let page = page.min(pages - 1);
        let screen = render::category_page(&category, &products, page);
        session.state = DialogState::CategoryView { category, page };
        Ok(screen)
    }

    async fn open_product(
        &self,
        session: &mut DialogSession,
        user_id: i64,
        product_id: i64,
        category: Option<String>,
    ) -> DialogResult<Screen> {
        let product = repository::product::find(&self.db.pool, product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DialogError::NotFound)?;
        let is_admin = self.is_admin(user_id).await?;
        session.state = DialogState::ProductView { product_id, category };
        Ok(render::product_detail(&product, is_admin))
    }

    async fn open_cart(&self, session: &mut DialogSession, user_id: i64) -> DialogResult<Screen> {
        let items = repository::cart::items(&self.db.pool, user_id).await?;
        session.state = DialogState::CartView;
        Ok(render::cart(&items))
    }

    async fn open_profile(
        &self,
        session: &mut DialogSession,
        user_id: i64,
    ) -> DialogResult<Screen> {
        let user = self.require_user(user_id).await?;
        session.state = DialogState::Profile;
        Ok(render::profile(&user))
    }

    async fn open_admin_menu(
        &self,
        session: &mut DialogSession,
        user_id: i64,
    ) -> DialogResult<Screen> {
        self.ensure_admin(user_id).await?;
        session.state = DialogState::AdminMenu;
        Ok(render::admin_menu())
    }

    // ========== Browsing ==========

    async fn in_main_menu(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::Catalog) => self.open_catalog(session).await,
            Some(ActionToken::Cart) => self.open_cart(session, event.user_id).await,
            Some(ActionToken::Profile) => self.open_profile(session, event.user_id).await,
            Some(ActionToken::Admin) => self.open_admin_menu(session, event.user_id).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    async fn in_catalog(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::Category(name)) => self.open_category(session, name, 0).await,
            Some(ActionToken::Catalog) => self.open_catalog(session).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    async fn in_category_view(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        category: String,
        _page: usize,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::Product(id)) => {
                self.open_product(session, event.user_id, id, Some(category)).await
            }
            Some(ActionToken::Page(n)) => self.open_category(session, category, n).await,
            Some(ActionToken::Category(name)) => self.open_category(session, name, 0).await,
            Some(ActionToken::Catalog) => self.open_catalog(session).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    async fn in_product_view(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        _product_id: i64,
        category: Option<String>,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::AddToCart(id)) => self.add_to_cart(event.user_id, id).await,
            Some(ActionToken::Cart) => self.open_cart(session, event.user_id).await,
            Some(ActionToken::BackToProducts) => match category {
                Some(name) => self.open_category(session, name, 0).await,
                None => self.open_catalog(session).await,
            },
            Some(ActionToken::Product(id)) => {
                self.open_product(session, event.user_id, id, category).await
            }
            Some(ActionToken::Edit(id)) => self.begin_edit(session, event.user_id, id).await,
            Some(ActionToken::Delete(id)) => {
                self.begin_delete(session, event.user_id, id, category).await
            }
            Some(ActionToken::Category(name)) => self.open_category(session, name, 0).await,
            Some(ActionToken::Catalog) => self.open_catalog(session).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    async fn add_to_cart(&self, user_id: i64, product_id: i64) -> DialogResult<Screen> {
        let product = repository::product::find(&self.db.pool, product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DialogError::ProductUnavailable)?;
        match repository::cart::add(&self.db.pool, user_id, product_id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => return Err(DialogError::ProductUnavailable),
            Err(e) => return Err(e.into()),
        }
        debug!(user_id, product_id, "product added to cart");
        Ok(render::added_to_cart(&product))
    }

    // ========== Cart and checkout ==========

    async fn in_cart_view(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::Checkout) => self.begin_checkout(session, event.user_id).await,
            Some(ActionToken::ClearCart) => {
                repository::cart::clear(&self.db.pool, event.user_id).await?;
                Ok(render::cart_cleared())
            }
            Some(ActionToken::RemoveFromCart(id)) => {
                repository::cart::remove(&self.db.pool, event.user_id, id).await?;
                self.open_cart(session, event.user_id).await
            }
            Some(ActionToken::Cart) => self.open_cart(session, event.user_id).await,
            Some(ActionToken::Catalog) => self.open_catalog(session).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    async fn begin_checkout(
        &self,
        session: &mut DialogSession,
        user_id: i64,
    ) -> DialogResult<Screen> {
        let items = repository::cart::items(&self.db.pool, user_id).await?;
        if items.is_empty() {
            return Err(DialogError::validation("🛒 Your cart is empty."));
        }
        info!(user_id, lines = items.len(), "checkout started");
        session.state = DialogState::OrderPhone {
            draft: OrderDraft::from_cart(&items),
        };
        Ok(render::prompt_phone())
    }

    async fn in_order_phone(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: OrderDraft,
    ) -> DialogResult<Screen> {
        match &event.kind {
            EventKind::Text(text) => {
                let phone = validate::phone(text)?;
                repository::user::set_phone(&self.db.pool, event.user_id, &phone).await?;
                draft.phone = Some(phone);
                session.state = DialogState::OrderAddress { draft };
                Ok(render::prompt_address())
            }
            _ => self.reject(session, event),
        }
    }

    async fn in_order_address(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: OrderDraft,
    ) -> DialogResult<Screen> {
        match &event.kind {
            EventKind::Text(text) => {
                let address = validate::address(text)?;
                draft.address = Some(address);
                session.state = DialogState::OrderComment { draft };
                Ok(render::comment_choice())
            }
            _ => self.reject(session, event),
        }
    }

    async fn in_order_comment(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: OrderDraft,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::AddComment) => Ok(render::comment_prompt()),
            Some(ActionToken::FinishOrder) => self.finish_order(session, event, draft).await,
            _ => match &event.kind {
                EventKind::Text(text) => {
                    draft.comment = Some(text.trim().to_string());
                    session.state = DialogState::OrderComment { draft };
                    Ok(render::comment_saved())
                }
                _ => self.reject(session, event),
            },
        }
    }

    async fn finish_order(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        draft: OrderDraft,
    ) -> DialogResult<Screen> {
        if draft.lines.is_empty() {
            session.state = DialogState::CartView;
            return Ok(render::checkout_empty());
        }
        let (Some(phone), Some(address)) = (draft.phone.as_deref(), draft.address.as_deref())
        else {
            return Err(DialogError::Internal(anyhow!(
                "order draft missing contact fields"
            )));
        };

        let order_id = repository::order::create(
            &self.db.pool,
            event.user_id,
            &draft.lines,
            &draft.total,
            phone,
            address,
            draft.comment.as_deref(),
        )
        .await?;
        info!(
            user_id = event.user_id,
            order_id,
            total = %draft.total,
            "📦 order placed"
        );

        let user = self.require_user(event.user_id).await?;
        self.notifier.notify(OrderNotice {
            order_id,
            user_id: event.user_id,
            buyer: user.display_name(),
            username: user.username.clone(),
            total: draft.total,
        });

        let is_admin = self.is_admin(event.user_id).await?;
        session.reset();
        Ok(render::order_confirmed(order_id, &draft.total, is_admin))
    }

    // ========== Profile ==========

    async fn in_profile(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::Profile) => self.open_profile(session, event.user_id).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    // ========== Admin ==========

    async fn in_admin_menu(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::AddProduct) => {
                self.ensure_admin(event.user_id).await?;
                session.state = DialogState::WaitingName {
                    draft: ProductDraft::new(),
                };
                Ok(render::prompt_name(None))
            }
            Some(ActionToken::ManageProducts) => {
                self.ensure_admin(event.user_id).await?;
                self.open_catalog(session).await
            }
            Some(ActionToken::Stats) => self.admin_stats(event.user_id).await,
            Some(ActionToken::Orders) => self.admin_orders(event.user_id).await,
            Some(ActionToken::Admin) => self.open_admin_menu(session, event.user_id).await,
            Some(ActionToken::MainMenu) => self.go_main(session, event.user_id).await,
            _ => self.reject(session, event),
        }
    }

    /// Stays in the admin menu; the screen links back to it.
    async fn admin_stats(&self, user_id: i64) -> DialogResult<Screen> {
        self.ensure_admin(user_id).await?;
        let products = repository::product::count_active(&self.db.pool).await?;
        let orders = repository::order::count(&self.db.pool).await?;
        let users = repository::user::count(&self.db.pool).await?;
        let revenue = repository::order::revenue(&self.db.pool).await?;
        let by_category = repository::product::count_by_category(&self.db.pool).await?;
        Ok(render::stats(products, orders, users, &revenue, &by_category))
    }

    async fn admin_orders(&self, user_id: i64) -> DialogResult<Screen> {
        self.ensure_admin(user_id).await?;
        let orders = repository::order::list_recent(&self.db.pool, RECENT_ORDERS).await?;
        Ok(render::orders_list(&orders))
    }

    async fn begin_edit(
        &self,
        session: &mut DialogSession,
        user_id: i64,
        product_id: i64,
    ) -> DialogResult<Screen> {
        self.ensure_admin(user_id).await?;
        let product = repository::product::find(&self.db.pool, product_id)
            .await?
            .ok_or(DialogError::NotFound)?;
        let draft = ProductDraft::from_product(&product);
        let screen = render::prompt_name(draft.name.as_deref());
        session.state = DialogState::WaitingName { draft };
        Ok(screen)
    }

    async fn begin_delete(
        &self,
        session: &mut DialogSession,
        user_id: i64,
        product_id: i64,
        category: Option<String>,
    ) -> DialogResult<Screen> {
        self.ensure_admin(user_id).await?;
        let product = repository::product::find(&self.db.pool, product_id)
            .await?
            .ok_or(DialogError::NotFound)?;
        session.state = DialogState::ConfirmDelete { product_id, category };
        Ok(render::confirm_delete(&product))
    }

    async fn in_confirm_delete(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        product_id: i64,
        category: Option<String>,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::ConfirmDelete(id)) if id == product_id => {
                self.ensure_admin(event.user_id).await?;
                let product = repository::product::find(&self.db.pool, id)
                    .await?
                    .ok_or(DialogError::NotFound)?;
                repository::product::soft_delete(&self.db.pool, id).await?;
                info!(user_id = event.user_id, product_id = id, "🗑 product deleted");

                let mut screen = match category {
                    Some(name) => self.open_category(session, name, 0).await?,
                    None => self.open_catalog(session).await?,
                };
                screen.text = format!("🗑 {} deleted.\n\n{}", product.name, screen.text);
                Ok(screen)
            }
            Some(ActionToken::Product(id)) if id == product_id => {
                self.open_product(session, event.user_id, id, category).await
            }
            _ => {
                // Anything else abandons the confirmation and is handled
                // as if the user were back on the product screen.
                session.state = DialogState::ProductView { product_id, category };
                Box::pin(self.step(session, event)).await
            }
        }
    }

    // ========== Product authoring ==========

    async fn in_waiting_name(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: ProductDraft,
    ) -> DialogResult<Screen> {
        match &event.kind {
            EventKind::Text(text) => {
                draft.name = Some(validate::product_name(text)?);
                let screen = render::prompt_description(draft.description.as_deref());
                session.state = DialogState::WaitingDescription { draft };
                Ok(screen)
            }
            _ => self.reject(session, event),
        }
    }

    async fn in_waiting_description(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: ProductDraft,
    ) -> DialogResult<Screen> {
        match &event.kind {
            EventKind::Text(text) => {
                draft.description = Some(validate::product_description(text)?);
                let screen = render::prompt_price(draft.price.as_ref());
                session.state = DialogState::WaitingPrice { draft };
                Ok(screen)
            }
            _ => self.reject(session, event),
        }
    }

    async fn in_waiting_price(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: ProductDraft,
    ) -> DialogResult<Screen> {
        match &event.kind {
            EventKind::Text(text) => {
                draft.price = Some(validate::price(text)?);
                let categories = repository::product::categories(&self.db.pool).await?;
                let screen = render::prompt_category(&categories, draft.category.as_deref());
                session.state = DialogState::WaitingCategory { draft };
                Ok(screen)
            }
            _ => self.reject(session, event),
        }
    }

    async fn in_waiting_category(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: ProductDraft,
    ) -> DialogResult<Screen> {
        match Self::action(event) {
            Some(ActionToken::PickCategory(name)) => {
                if !repository::product::category_exists(&self.db.pool, &name).await? {
                    return Err(DialogError::validation(
                        "❌ Pick one of the listed categories.",
                    ));
                }
                draft.category = Some(name);
                let screen = render::prompt_images(draft.images.len());
                session.state = DialogState::WaitingImages { draft };
                Ok(screen)
            }
            _ => self.reject(session, event),
        }
    }

    async fn in_waiting_images(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        mut draft: ProductDraft,
    ) -> DialogResult<Screen> {
        match &event.kind {
            EventKind::Media(reference) => {
                draft.images.push(reference.clone());
                let count = draft.images.len();
                session.state = DialogState::WaitingImages { draft };
                Ok(render::image_added(count))
            }
            _ => match Self::action(event) {
                Some(ActionToken::FinishImages) => {
                    self.save_product(session, event.user_id, draft).await
                }
                _ => self.reject(session, event),
            },
        }
    }

    async fn save_product(
        &self,
        session: &mut DialogSession,
        user_id: i64,
        draft: ProductDraft,
    ) -> DialogResult<Screen> {
        self.ensure_admin(user_id).await?;
        let ProductDraft {
            id,
            name: Some(name),
            description: Some(description),
            price: Some(price),
            category: Some(category),
            images,
        } = draft
        else {
            return Err(DialogError::Internal(anyhow!(
                "product draft incomplete at save"
            )));
        };

        let edited = id.is_some();
        match id {
            Some(id) => {
                repository::product::update(
                    &self.db.pool,
                    id,
                    &name,
                    &description,
                    &price,
                    &category,
                    &images,
                )
                .await?;
                info!(user_id, product_id = id, "✏️ product updated");
            }
            None => {
                let new_id = repository::product::insert(
                    &self.db.pool,
                    &name,
                    &description,
                    &price,
                    &category,
                    &images,
                )
                .await?;
                info!(user_id, product_id = new_id, "➕ product created");
            }
        }

        session.state = DialogState::AdminMenu;
        Ok(render::product_saved(&name, edited))
    }

    // ========== Error policy ==========

    /// Map an error to a reply and, where the state is no longer safe, a
    /// reset. Validation and availability problems keep the user where
    /// they are; anything broken drops them back to the main menu.
    fn error_screen(
        &self,
        session: &mut DialogSession,
        event: &InboundEvent,
        error: DialogError,
    ) -> Screen {
        let user_id = event.user_id;
        let state = session.state.name();
        match error {
            DialogError::Validation(message) => {
                debug!(user_id, state, "input rejected");
                Screen::text(message)
            }
            DialogError::Unauthorized => {
                warn!(user_id, state, "unauthorized action");
                render::unauthorized()
            }
            DialogError::NotFound | DialogError::Repo(RepoError::NotFound) => {
                debug!(user_id, state, "target no longer exists");
                session.reset();
                render::not_found()
            }
            DialogError::ProductUnavailable => {
                debug!(user_id, state, "product unavailable");
                render::product_unavailable()
            }
            DialogError::Repo(e) => {
                error!(user_id, state, "store failure: {e}");
                session.reset();
                render::fault()
            }
            DialogError::Internal(e) => {
                error!(user_id, state, "unhandled fault: {e:#}");
                session.reset();
                render::fault()
            }
        }
    }
}
