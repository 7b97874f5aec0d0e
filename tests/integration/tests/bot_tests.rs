//! End-to-end command scenarios
//!
//! Messages go through parsing, services and rendering exactly as the
//! runtime handles them, with an in-memory store instead of PostgreSQL.
//!
//! Run with: cargo test -p integration-tests --test bot_tests

use chrono::{Duration, Utc};
use integration_tests::{button_targets, reply_text, user, FakeDirectory, TestBot};
use woxl_bot::handlers::on_bot_membership;
use woxl_bot::protocol::{BotMembership, Outbound};
use woxl_core::{RoleLevel, UserId};
use woxl_service::WarnService;

const TARGET_HINT: &str =
    "Не удалось определить пользователя. Ответьте на сообщение пользователя или укажите его id.";

// ============================================================================
// Start and membership
// ============================================================================

#[tokio::test]
async fn test_start_greets_and_registers_chat() {
    let bot = TestBot::start().unwrap();
    let ann = user(1, "Ann");

    let out = bot.send(&ann, "/start@WoxlBot").await.unwrap();
    assert!(out.text().starts_with("🍊 Привет, Ann."));
    assert!(matches!(out, Outbound::Send { reply_to: None, .. }));

    use woxl_core::ChatRepository;
    assert!(bot.store.exists(bot.chat).await.unwrap());
}

#[tokio::test]
async fn test_join_bootstraps_creator_as_owner() {
    let bot = TestBot::start().unwrap();
    let change = BotMembership {
        chat_id: bot.chat,
        present: true,
    };

    on_bot_membership(&bot.ctx, &FakeDirectory::with_creator(77), &change).await;
    assert_eq!(bot.level_of(UserId::new(77)).await.unwrap(), Some(RoleLevel::Owner));
}

#[tokio::test]
async fn test_join_failure_is_swallowed() {
    let bot = TestBot::start().unwrap();
    let change = BotMembership {
        chat_id: bot.chat,
        present: true,
    };

    on_bot_membership(&bot.ctx, &FakeDirectory::failing(), &change).await;
    let roster = bot.say(&user(1, "Ann"), "админы").await;
    assert!(!roster.contains("tg://user"));
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_owner_assigns_and_lists() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let bob = user(2, "Bob");
    bot.bootstrap_owner(&owner).await.unwrap();

    let text = bot.say_reply(&owner, &bob, "+админ за помощь").await;
    assert_eq!(
        text,
        "➕ <a href=\"tg://user?id=2\">Bob</a> назначен на роль: 🛡 Администратор [4]\n\
         С большой силой приходит большая ответственность."
    );

    let roster = bot.say(&bob, "?админ").await;
    assert!(roster.starts_with("🍊 Список администраторов"));
    assert!(roster.contains("[4] 🛡 Администратор\n<a href=\"tg://user?id=2\">2</a>"));
    assert!(roster.contains("[3] 🔰 Мл. администратор\n(пусто)"));
}

#[tokio::test]
async fn test_admin_cannot_assign_roles() {
    let bot = TestBot::start().unwrap();
    let a = user(1, "A");
    let b = user(2, "B");
    let c = user(3, "C");
    bot.bootstrap_owner(&a).await.unwrap();

    bot.say(&a, "выдать 4 2").await;
    assert_eq!(bot.level_of(b.id).await.unwrap(), Some(RoleLevel::Admin));

    let text = bot.say_reply(&b, &c, "выдать 4").await;
    assert_eq!(text, "Только Владелец может выдавать админов.");
    assert_eq!(bot.level_of(c.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_promote_demote_replies() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let mod_ = user(5, "Mod");
    bot.bootstrap_owner(&owner).await.unwrap();
    bot.grant(&owner, &mod_, RoleLevel::Moderator).await.unwrap();

    let up = bot.say_reply(&owner, &mod_, "повысить").await;
    assert!(up.starts_with("⬆️ <a href=\"tg://user?id=5\">Mod</a> повышен до: 🔰 Мл. администратор [3]"));

    let down = bot.say(&owner, "понижение 5").await;
    assert!(down.starts_with("⬇️ <a href=\"tg://user?id=5\">5</a> понижен до: 🧩 Модератор [2]"));

    let bottom = user(6, "Junior");
    bot.grant(&owner, &bottom, RoleLevel::JuniorModerator).await.unwrap();
    let text = bot.say_reply(&owner, &bottom, "понизить").await;
    assert_eq!(text, "Нельзя понизить ниже минимальной роли.");

    let text = bot.say_reply(&owner, &owner, "повысить").await;
    assert_eq!(text, "Нельзя повысить выше существующей роли.");

    let text = bot.say_reply(&mod_, &bottom, "повысить").await;
    assert_eq!(text, "Только Владелец может повышать/понижать.");
}

#[tokio::test]
async fn test_revoke_role_without_assignment() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    bot.bootstrap_owner(&owner).await.unwrap();

    let text = bot.say(&owner, "снять 404").await;
    assert_eq!(text, "У пользователя нет роли в этой группе.");

    bot.grant(&owner, &user(8, "Eve"), RoleLevel::Moderator).await.unwrap();
    let text = bot.say(&owner, "-админ 8").await;
    assert!(text.starts_with("➖ <a href=\"tg://user?id=8\">8</a> снят с роли: 🧩 Модератор [2]"));
}

#[tokio::test]
async fn test_username_target_is_rejected() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    bot.bootstrap_owner(&owner).await.unwrap();

    assert_eq!(bot.say(&owner, "+модер @someone").await, TARGET_HINT);
    assert_eq!(bot.say(&owner, "варн @someone 10m spam").await, TARGET_HINT);
    assert_eq!(bot.say(&owner, "-варн").await, TARGET_HINT);
}

// ============================================================================
// Warns
// ============================================================================

#[tokio::test]
async fn test_unassigned_user_cannot_warn() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    bot.bootstrap_owner(&owner).await.unwrap();

    let stranger = user(40, "Stranger");
    let text = bot.say_reply(&stranger, &owner, "варн 1h").await;
    assert_eq!(text, "Выдавать и снимать предупреждения могут только участники с ролью.");
    assert!(bot.store.all_warns(bot.chat).is_empty());
}

#[tokio::test]
async fn test_junior_warn_shows_remaining_time() {
    let mut bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let junior = user(2, "Junior");
    let target = user(3, "Target");
    bot.bootstrap_owner(&owner).await.unwrap();
    bot.grant(&owner, &junior, RoleLevel::JuniorModerator).await.unwrap();

    let issued = bot.say_reply(&junior, &target, "варн 10m spam").await;
    assert!(issued.starts_with("⚠️ <a href=\"tg://user?id=3\">Target</a> получил предупреждение до "));
    assert!(issued.ends_with(" за: spam."));

    bot.at(Utc::now() + Duration::seconds(1));
    let out = bot.send(&owner, "?пред").await.unwrap();
    let line = out
        .text()
        .lines()
        .find(|l| l.starts_with("│   1."))
        .unwrap()
        .to_string();
    assert_eq!(
        line,
        "│   1. <a href=\"tg://user?id=3\">3</a> наказан за spam до (9м)"
    );
    assert!(out.text().ends_with("└─ Страница: 1"));
    assert_eq!(button_targets(&out), vec!["warns:1", "warns:2"]);
}

#[tokio::test]
async fn test_warn_by_id_keeps_id_out_of_reason() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    bot.bootstrap_owner(&owner).await.unwrap();

    let text = bot.say(&owner, "пред 12345 флуд").await;
    assert!(text.ends_with(" до без срока за: флуд."));

    let warns = bot.store.all_warns(bot.chat);
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].user_id, UserId::new(12345));
    assert_eq!(warns[0].reason.as_deref(), Some("флуд"));
    assert_eq!(warns[0].until, None);
}

#[tokio::test]
async fn test_zero_duration_stays_in_reason() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let target = user(3, "Target");
    bot.bootstrap_owner(&owner).await.unwrap();

    let text = bot.say_reply(&owner, &target, "варн 0m spam").await;
    assert!(text.ends_with(" до без срока за: 0m spam."));

    let warns = bot.store.all_warns(bot.chat);
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].reason.as_deref(), Some("0m spam"));
    assert_eq!(warns[0].until, None);
}

#[tokio::test]
async fn test_duration_past_calendar_stays_in_reason() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let target = user(3, "Target");
    bot.bootstrap_owner(&owner).await.unwrap();

    let text = bot.say_reply(&owner, &target, "варн 5000000y spam").await;
    assert!(text.ends_with(" до без срока за: 5000000y spam."));

    let warns = bot.store.all_warns(bot.chat);
    assert_eq!(warns.len(), 1);
    assert_eq!(warns[0].reason.as_deref(), Some("5000000y spam"));
}

#[tokio::test]
async fn test_long_reasons_are_accepted() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let target = user(3, "Target");
    bot.bootstrap_owner(&owner).await.unwrap();

    let reason = "ж".repeat(1500);
    let text = bot.say_reply(&owner, &target, &format!("варн {reason}")).await;
    assert!(text.ends_with(&format!(" за: {reason}.")));
    assert_eq!(bot.store.all_warns(bot.chat).len(), 1);

    let text = bot.say_reply(&owner, &target, &format!("+админ {reason}")).await;
    assert!(text.starts_with("➕ "));
    assert_eq!(bot.level_of(target.id).await.unwrap(), Some(RoleLevel::Admin));
}

#[tokio::test]
async fn test_reason_is_escaped() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    bot.bootstrap_owner(&owner).await.unwrap();

    let text = bot.say(&owner, "варн 9 <b>caps</b>").await;
    assert!(text.ends_with("за: &lt;b&gt;caps&lt;/b&gt;."));
}

#[tokio::test]
async fn test_revoke_warns_reply() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let target = user(3, "Target");
    bot.bootstrap_owner(&owner).await.unwrap();

    assert_eq!(
        bot.say_reply(&owner, &target, "-пред").await,
        "У пользователя нет активных предупреждений."
    );

    bot.say_reply(&owner, &target, "+пред").await;
    bot.say_reply(&owner, &target, "+варн 1d").await;
    assert_eq!(
        bot.say_reply(&owner, &target, "-варн").await,
        "✅ С <a href=\"tg://user?id=3\">Target</a> было снято предупреждение."
    );

    let list = bot.say(&owner, "?варн").await;
    assert!(list.contains("┌─ Всего активных предупреждений: 0"));
}

#[tokio::test]
async fn test_warn_pages_via_buttons() {
    let bot = TestBot::with_page_size(2).unwrap();
    let owner = user(1, "Owner");
    bot.bootstrap_owner(&owner).await.unwrap();

    let warns = WarnService::new(&bot.ctx);
    for i in 0..5 {
        warns
            .issue(
                bot.chat,
                owner.id,
                UserId::new(100 + i),
                woxl_service::IssueWarnRequest::new(Some(format!("r{i}")), None),
            )
            .await
            .unwrap();
    }

    let outcome = bot.press(&owner, 555, "warns:2").await;
    let edit = outcome.edit.unwrap();
    assert!(matches!(edit, Outbound::Edit { message_id: 555, .. }));
    assert!(edit.text().contains("│   3. "));
    assert!(edit.text().ends_with("└─ Страница: 2"));
    assert_eq!(button_targets(&edit), vec!["warns:1", "warns:3"]);

    // Past the end clamps to the last page
    let edit = bot.press(&owner, 555, "warns:99").await.edit.unwrap();
    assert!(edit.text().ends_with("└─ Страница: 3"));
    assert!(edit.text().contains("│   5. "));

    // Pages beyond u32 clamp to the last page as well
    let edit = bot.press(&owner, 555, "warns:99999999999").await.edit.unwrap();
    assert!(edit.text().ends_with("└─ Страница: 3"));

    // Garbage page numbers fall back to page 1, prev never below 1
    let edit = bot.press(&owner, 555, "warns:zero").await.edit.unwrap();
    assert!(edit.text().ends_with("└─ Страница: 1"));
    assert_eq!(button_targets(&edit), vec!["warns:1", "warns:2"]);

    let ignored = bot.press(&owner, 555, "bans:1").await;
    assert!(ignored.edit.is_none());
    assert!(ignored.notice.is_none());
}

// ============================================================================
// Nicks
// ============================================================================

#[tokio::test]
async fn test_nick_lifecycle() {
    let bot = TestBot::start().unwrap();
    let ann = user(1, "Ann");
    let ben = user(2, "Ben");

    assert_eq!(bot.say(&ann, "ник").await, "Использование: ник [новое имя]");
    assert_eq!(
        bot.say(&ann, "?ник").await,
        "У вас нет ника. Установите с помощью: ник [имя]"
    );

    assert_eq!(
        bot.say(&ann, "ник  Анна <3 ").await,
        "✅ Имя изменено на <a href=\"tg://user?id=1\">Анна &lt;3</a>!"
    );
    assert_eq!(
        bot.say(&ann, "?ник").await,
        "🍊 Вас зовут <a href=\"tg://user?id=1\">Анна &lt;3</a>."
    );
    assert_eq!(
        bot.say_reply(&ben, &ann, "?ник").await,
        "Это пользователь <a href=\"tg://user?id=1\">Анна &lt;3</a>."
    );
    assert_eq!(bot.say(&ann, "?ник 2").await, "У пользователя нет ника.");

    let too_long = format!("ник {}", "я".repeat(65));
    assert_eq!(bot.say(&ann, &too_long).await, "Ник должен быть не длиннее 64 символов.");
}

#[tokio::test]
async fn test_nicks_show_in_role_replies() {
    let bot = TestBot::start().unwrap();
    let owner = user(1, "Owner");
    let bob = user(2, "Bob");
    bot.bootstrap_owner(&owner).await.unwrap();

    bot.say(&bob, "ник Боб").await;
    let text = bot.say(&owner, "+модер 2").await;
    assert!(text.starts_with("➕ <a href=\"tg://user?id=2\">Боб</a> назначен на роль: 🧩 Модератор [2]"));

    let roster = bot.say(&owner, "админы").await;
    assert!(roster.contains("[2] 🧩 Модератор\n<a href=\"tg://user?id=2\">Боб</a>"));
}

#[tokio::test]
async fn test_chatter_gets_no_reply() {
    let bot = TestBot::start().unwrap();
    assert!(bot.send(&user(1, "Ann"), "всем привет").await.is_none());
    assert!(reply_text(bot.send(&user(1, "Ann"), "/admins").await).starts_with("🍊"));
}
