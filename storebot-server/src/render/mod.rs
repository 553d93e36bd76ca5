//! Screen rendering.
//!
//! One function per screen the bot can show. All button labels and texts
//! live here; the engine decides *which* screen, this module decides what
//! it looks like. Every button token must be one the engine accepts in the
//! state the screen leads to, otherwise the button would be rejected when
//! pressed.

use rust_decimal::Decimal;

use shared::models::cart::{CartItem, cart_total};
use shared::models::{Category, Product, User};
use shared::screen::{Action, Screen};

use crate::db::repository::order::OrderWithBuyer;
use crate::engine::token::ActionToken;

pub const PAGE_SIZE: usize = 10;
pub const CATEGORIES_PER_ROW: usize = 2;

// ========== Formatting ==========

/// "15 000.5 ₽" style: at most two decimals, trailing zeros dropped,
/// thousands separated by spaces.
pub fn format_price(value: &Decimal) -> String {
    let normalized = value.round_dp(2).normalize();
    let raw = normalized.to_string();
    let (int_part, frac) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    match frac {
        Some(f) => format!("{sign}{grouped}.{f} ₽"),
        None => format!("{sign}{grouped} ₽"),
    }
}

pub fn format_date(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main_row() -> Vec<Action> {
    vec![Action::new("🏠 Main menu", ActionToken::MainMenu.to_string())]
}

fn admin_back_rows(screen: Screen) -> Screen {
    screen
        .row(vec![Action::new("⬅️ Admin panel", ActionToken::Admin.to_string())])
        .row(main_row())
}

fn main_menu_rows(screen: Screen, is_admin: bool) -> Screen {
    let screen = screen
        .row(vec![Action::new("🛍 Catalog", ActionToken::Catalog.to_string())])
        .row(vec![Action::new("🛒 Cart", ActionToken::Cart.to_string())])
        .row(vec![Action::new("👤 Profile", ActionToken::Profile.to_string())]);
    if is_admin {
        screen.row(vec![Action::new("⚙️ Admin panel", ActionToken::Admin.to_string())])
    } else {
        screen
    }
}

// ========== Entry and fallback screens ==========

pub fn welcome(name: &str, is_admin: bool) -> Screen {
    let text = format!(
        "👋 Hello, {name}!\n\nWelcome to our furniture store. \
         Browse the catalog, fill your cart and we'll deliver."
    );
    main_menu_rows(Screen::text(text), is_admin)
}

pub fn main_menu(is_admin: bool) -> Screen {
    main_menu_rows(Screen::text("🏠 Main menu"), is_admin)
}

pub fn cancelled(is_admin: bool) -> Screen {
    main_menu_rows(Screen::text("✖️ Cancelled. Back to the main menu."), is_admin)
}

/// Shown when the current state has no handler for the event.
pub fn not_available() -> Screen {
    Screen::text("⚠️ I didn't expect that here. Use the buttons below, or /cancel to start over.")
}

pub fn not_found() -> Screen {
    Screen::text("😕 Can't find that item anymore.").row(main_row())
}

pub fn unauthorized() -> Screen {
    Screen::text("⛔ This action is for admins only.")
}

pub fn product_unavailable() -> Screen {
    Screen::text("😕 This product is no longer available.").row(main_row())
}

pub fn fault() -> Screen {
    Screen::text("😵 Something went wrong. Let's start over.").row(main_row())
}

// ========== Catalog ==========

pub fn category_list(categories: &[Category]) -> Screen {
    let mut screen = Screen::text("🛍 Catalog\n\nPick a category:");
    for chunk in categories.chunks(CATEGORIES_PER_ROW) {
        let row = chunk
            .iter()
            .map(|c| Action::new(c.label(), ActionToken::Category(c.name.clone()).to_string()))
            .collect();
        screen = screen.row(row);
    }
    screen.row(main_row())
}

fn categories_row() -> Vec<Action> {
    vec![Action::new("⬅️ Categories", ActionToken::Catalog.to_string())]
}

/// One page of a category listing. `page` is zero-based and already clamped
/// by the caller; it is clamped again here so a stale button can never
/// address past the end.
pub fn category_page(category: &str, products: &[Product], page: usize) -> Screen {
    if products.is_empty() {
        return Screen::text(format!("😔 Nothing in {category} yet."))
            .row(categories_row())
            .row(main_row());
    }

    let pages = products.len().div_ceil(PAGE_SIZE);
    let page = page.min(pages - 1);
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(products.len());

    let mut screen = Screen::text(format!("📂 {category}\nPage {} of {pages}", page + 1));
    for product in &products[start..end] {
        screen = screen.row(vec![Action::new(
            format!("{} · {}", product.name, format_price(&product.price)),
            ActionToken::Product(product.id).to_string(),
        )]);
    }

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(Action::new("⬅️", ActionToken::Page(page - 1).to_string()));
    }
    if end < products.len() {
        nav.push(Action::new("➡️", ActionToken::Page(page + 1).to_string()));
    }
    if !nav.is_empty() {
        screen = screen.row(nav);
    }

    screen.row(categories_row()).row(main_row())
}

pub fn product_detail(product: &Product, is_admin: bool) -> Screen {
    let text = format!(
        "{}\n\n{}\n\n💰 {}",
        product.name,
        product.description,
        format_price(&product.price)
    );
    let mut screen = Screen::text(text)
        .with_media(product.images.clone())
        .row(vec![Action::new(
            "🛒 Add to cart",
            ActionToken::AddToCart(product.id).to_string(),
        )])
        .row(vec![Action::new(
            "⬅️ Back to products",
            ActionToken::BackToProducts.to_string(),
        )]);
    if is_admin {
        screen = screen.row(vec![
            Action::new("✏️ Edit", ActionToken::Edit(product.id).to_string()),
            Action::new("🗑 Delete", ActionToken::Delete(product.id).to_string()),
        ]);
    }
    screen.row(main_row())
}

pub fn added_to_cart(product: &Product) -> Screen {
    Screen::text(format!("✅ {} added to cart.", product.name))
        .row(vec![Action::new("🛒 Go to cart", ActionToken::Cart.to_string())])
        .row(vec![Action::new(
            "⬅️ Back to products",
            ActionToken::BackToProducts.to_string(),
        )])
        .row(main_row())
}

pub fn confirm_delete(product: &Product) -> Screen {
    Screen::text(format!(
        "⚠️ Delete {}?\n\nIt will disappear from the catalog; placed orders keep their copy.",
        product.name
    ))
    .row(vec![
        Action::new("✅ Yes, delete", ActionToken::ConfirmDelete(product.id).to_string()),
        Action::new("❌ Cancel", ActionToken::Product(product.id).to_string()),
    ])
}

// ========== Cart and checkout ==========

pub fn cart(items: &[CartItem]) -> Screen {
    if items.is_empty() {
        return Screen::text("🛒 Your cart is empty.\n\nBrowse the catalog to add something.")
            .row(vec![Action::new("🛍 Catalog", ActionToken::Catalog.to_string())])
            .row(main_row());
    }

    let mut text = String::from("🛒 Your cart:\n\n");
    for item in items {
        text.push_str(&format!(
            "• {}: {} × {} = {}\n",
            item.name,
            format_price(&item.price),
            item.quantity,
            format_price(&item.line_total()),
        ));
    }
    text.push_str(&format!("\n💰 Total: {}", format_price(&cart_total(items))));

    let mut screen = Screen::text(text);
    for item in items {
        screen = screen.row(vec![Action::new(
            format!("➖ {}", item.name),
            ActionToken::RemoveFromCart(item.product_id).to_string(),
        )]);
    }
    screen
        .row(vec![Action::new("✅ Checkout", ActionToken::Checkout.to_string())])
        .row(vec![Action::new("🧹 Clear cart", ActionToken::ClearCart.to_string())])
        .row(vec![Action::new(
            "🛍 Continue shopping",
            ActionToken::Catalog.to_string(),
        )])
        .row(main_row())
}

pub fn cart_cleared() -> Screen {
    Screen::text("🧹 Cart cleared.")
        .row(vec![Action::new("🛍 Catalog", ActionToken::Catalog.to_string())])
        .row(main_row())
}

pub fn checkout_empty() -> Screen {
    Screen::text("🛒 Your cart is empty.")
        .row(vec![Action::new("🛍 Catalog", ActionToken::Catalog.to_string())])
        .row(main_row())
}

pub fn prompt_phone() -> Screen {
    Screen::text(
        "📞 Send your contact phone number, e.g. +71234567890.\n\n/cancel to abort.",
    )
}

pub fn prompt_address() -> Screen {
    Screen::text(
        "📍 Now the delivery address: city, street, house.\n\n/cancel to abort.",
    )
}

pub fn comment_choice() -> Screen {
    Screen::text("💬 Add a comment to the order?").row(vec![
        Action::new("💬 Add comment", ActionToken::AddComment.to_string()),
        Action::new("✅ Place order", ActionToken::FinishOrder.to_string()),
    ])
}

pub fn comment_prompt() -> Screen {
    Screen::text("💬 Send your comment:\n\n/cancel to abort.")
}

pub fn comment_saved() -> Screen {
    Screen::text("✅ Comment saved.").row(vec![Action::new(
        "✅ Place order",
        ActionToken::FinishOrder.to_string(),
    )])
}

pub fn order_confirmed(order_id: i64, total: &Decimal, is_admin: bool) -> Screen {
    let text = format!(
        "🎉 Order #{order_id} placed!\n💰 Total: {}\n\nWe will contact you shortly.",
        format_price(total)
    );
    main_menu_rows(Screen::text(text), is_admin)
}

// ========== Profile ==========

pub fn profile(user: &User) -> Screen {
    let username = user
        .username
        .as_ref()
        .map(|u| format!("@{u}"))
        .unwrap_or_else(|| "not set".to_string());
    let phone = user.phone.as_deref().unwrap_or("not set");
    Screen::text(format!(
        "👤 Profile\n\nName: {}\nUsername: {}\nID: {}\nPhone: {}",
        user.display_name(),
        username,
        user.id,
        phone
    ))
    .row(main_row())
}

// ========== Admin ==========

pub fn admin_menu() -> Screen {
    Screen::text("⚙️ Admin panel")
        .row(vec![Action::new("➕ Add product", ActionToken::AddProduct.to_string())])
        .row(vec![Action::new(
            "📦 Manage products",
            ActionToken::ManageProducts.to_string(),
        )])
        .row(vec![Action::new("📊 Stats", ActionToken::Stats.to_string())])
        .row(vec![Action::new("📬 Orders", ActionToken::Orders.to_string())])
        .row(main_row())
}

pub fn stats(
    products: i64,
    orders: i64,
    users: i64,
    revenue: &Decimal,
    by_category: &[(String, i64)],
) -> Screen {
    let mut text = format!(
        "📊 Store stats\n\n📦 Active products: {products}\n🧾 Orders: {orders}\n\
         👥 Users: {users}\n💰 Revenue: {}\n",
        format_price(revenue)
    );
    if !by_category.is_empty() {
        text.push_str("\nBy category:\n");
        for (category, count) in by_category {
            text.push_str(&format!("• {category}: {count}\n"));
        }
    }
    admin_back_rows(Screen::text(text.trim_end().to_string()))
}

pub fn orders_list(orders: &[OrderWithBuyer]) -> Screen {
    if orders.is_empty() {
        return admin_back_rows(Screen::text("📭 No orders yet."));
    }

    let mut text = String::from("📬 Recent orders:\n");
    for entry in orders {
        let order = &entry.order;
        text.push_str(&format!(
            "\n📦 Order #{} · {}\n👤 {} (id {})\n📞 {}\n📍 {}\n",
            order.id,
            format_date(order.created_at),
            entry.buyer_label(),
            order.user_id,
            order.phone,
            order.address,
        ));
        if let Some(comment) = &order.comment {
            text.push_str(&format!("💬 {comment}\n"));
        }
        text.push_str(&format!(
            "🛒 {} pcs · 💰 {} · {}\n",
            order.item_count(),
            format_price(&order.total),
            order.status
        ));
    }
    admin_back_rows(Screen::text(text.trim_end().to_string()))
}

// ========== Product authoring ==========

fn with_current(prompt: &str, current: Option<&str>) -> String {
    match current {
        Some(value) => format!("{prompt}\nCurrent: {value}\n\n/cancel to abort."),
        None => format!("{prompt}\n\n/cancel to abort."),
    }
}

pub fn prompt_name(current: Option<&str>) -> Screen {
    Screen::text(with_current("📝 Send the product name:", current))
}

pub fn prompt_description(current: Option<&str>) -> Screen {
    Screen::text(with_current("📄 Send the product description:", current))
}

pub fn prompt_price(current: Option<&Decimal>) -> Screen {
    let current = current.map(format_price);
    Screen::text(with_current(
        "💰 Send the price, e.g. 15000 or 15000.50:",
        current.as_deref(),
    ))
}

pub fn prompt_category(categories: &[Category], current: Option<&str>) -> Screen {
    let mut screen = Screen::text(with_current("📁 Pick a category:", current));
    for chunk in categories.chunks(CATEGORIES_PER_ROW) {
        let row = chunk
            .iter()
            .map(|c| Action::new(c.label(), ActionToken::PickCategory(c.name.clone()).to_string()))
            .collect();
        screen = screen.row(row);
    }
    screen
}

fn done_row() -> Vec<Action> {
    vec![Action::new("✅ Done", ActionToken::FinishImages.to_string())]
}

pub fn prompt_images(count: usize) -> Screen {
    let mut text = String::from("🖼 Send product photos one by one.");
    if count > 0 {
        text.push_str(&format!("\nAlready attached: {count}."));
    }
    text.push_str("\n\nPress ✅ Done when finished.");
    Screen::text(text).row(done_row())
}

pub fn image_added(count: usize) -> Screen {
    Screen::text(format!("📷 Photo {count} attached.")).row(done_row())
}

pub fn product_saved(name: &str, edited: bool) -> Screen {
    let verb = if edited { "updated" } else { "saved" };
    admin_back_rows(Screen::text(format!("✅ {name} {verb}.")))
}

// ========== Admin notifications ==========

pub fn order_notice(
    order_id: i64,
    buyer: &str,
    username: Option<&str>,
    user_id: i64,
    total: &Decimal,
) -> Screen {
    let mut text = format!("🔔 New order #{order_id}\n👤 From: {buyer}");
    if let Some(username) = username {
        text.push_str(&format!(" (@{username})"));
    }
    text.push_str(&format!("\n🆔 User ID: {user_id}\n💰 Total: {}", format_price(total)));
    Screen::text(text)
}
