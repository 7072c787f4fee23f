use crate::{
    error::AppResult,
    models::{category, comment, review, user, Category},
};
use chrono::NaiveDateTime;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use std::env;

/// Whether the demo fixture set should be inserted at startup.
pub fn demo_seed_enabled() -> bool {
    env::var("SEED_DEMO_DATA")
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(false)
}

fn ts_millis(ms: i64) -> NaiveDateTime {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

const PLACEHOLDER_IMG: &str =
    "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png";

/// Populate the database with the demo dataset: 4 users, 4 categories
/// (one without any reviews), 13 reviews and 6 comments, inserted in
/// dependency order (users, categories, reviews, comments).
///
/// Insertion order doubles as id assignment on a freshly reset database,
/// which the integration suite relies on. Skips quietly if categories are
/// already present.
pub async fn seed_database(db: &DatabaseConnection) -> AppResult<()> {
    if Category::find().count(db).await? > 0 {
        tracing::debug!("Seed skipped, data already present");
        return Ok(());
    }

    let users = [
        (
            "mallionaire",
            "haz",
            Some("https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"),
        ),
        (
            "philippaclaire9",
            "philippa",
            Some("https://avatars2.githubusercontent.com/u/24604688?s=460&v=4"),
        ),
        (
            "bainesface",
            "sarah",
            Some("https://avatars2.githubusercontent.com/u/24394918?s=400&v=4"),
        ),
        ("dav3rid", "dave", None),
    ];

    user::Entity::insert_many(users.map(|(username, name, avatar_url)| user::ActiveModel {
        username: sea_orm::ActiveValue::Set(username.to_string()),
        name: sea_orm::ActiveValue::Set(name.to_string()),
        avatar_url: sea_orm::ActiveValue::Set(avatar_url.map(str::to_string)),
    }))
    .exec(db)
    .await?;

    let categories = [
        ("euro game", "Abstact games that involve little luck"),
        (
            "social deduction",
            "Players attempt to uncover each other's hidden role",
        ),
        ("dexterity", "Games involving physical skill"),
        ("children's games", "Games suitable for children"),
    ];

    category::Entity::insert_many(categories.map(|(slug, description)| category::ActiveModel {
        slug: sea_orm::ActiveValue::Set(slug.to_string()),
        description: sea_orm::ActiveValue::Set(description.to_string()),
    }))
    .exec(db)
    .await?;

    // (title, designer, owner, body, category, created_at millis, votes)
    let reviews: [(&str, &str, &str, &str, &str, i64, i32); 13] = [
        (
            "Agricola",
            "Uwe Rosenberg",
            "mallionaire",
            "Farmyard fun!",
            "euro game",
            1610964020514,
            1,
        ),
        (
            "Jenga",
            "Leslie Scott",
            "philippaclaire9",
            "Fiddly fun for all the family",
            "dexterity",
            1610964101251,
            5,
        ),
        (
            "Ultimate Werewolf",
            "Akihisa Okui",
            "bainesface",
            "We couldn't find the werewolf!",
            "social deduction",
            1610964101251,
            5,
        ),
        (
            "Dolor reprehenderit",
            "Gamey McGameface",
            "mallionaire",
            "Consequat velit occaecat voluptate do. Dolor pariatur fugiat sint et proident ex do consequat est.",
            "social deduction",
            1611315350936,
            7,
        ),
        (
            "Proident tempor et.",
            "Seymour Buttz",
            "mallionaire",
            "Labore occaecat sunt qui commodo anim anim aliqua adipisicing aliquip fugiat.",
            "social deduction",
            1610010368077,
            5,
        ),
        (
            "Occaecat consequat officia in quis commodo.",
            "Ollie Tabooger",
            "mallionaire",
            "Fugiat fugiat enim officia laborum quis. Aliquip laboris non nulla nostrud magna exercitation.",
            "social deduction",
            1600010368077,
            8,
        ),
        (
            "Mollit elit qui incididunt veniam occaecat cupidatat",
            "Avery Wunzboogerz",
            "mallionaire",
            "Consectetur incididunt aliquip sunt aliquip. Magna duis veniam consectetur.",
            "social deduction",
            1607946066000,
            9,
        ),
        (
            "One Night Ultimate Werewolf",
            "Akihisa Okui",
            "mallionaire",
            "We couldn't find the werewolf!",
            "social deduction",
            1610964101251,
            5,
        ),
        (
            "A truly Quacking Game; Quacks of Quedlinburg",
            "Wolfgang Warsch",
            "mallionaire",
            "Brew potions, keep your luck vs risk at bay, and don't let your cauldron explode.",
            "social deduction",
            1610964101251,
            10,
        ),
        (
            "Build you own tour de Yorkshire",
            "Asger Harding Granerud",
            "mallionaire",
            "Cold rain pours on the faces of your team of cyclists as you push them through the hills of Yorkshire.",
            "social deduction",
            1600755770621,
            10,
        ),
        (
            "That's just what an evil person would say!",
            "Fiona Lohoar",
            "mallionaire",
            "If you've ever wanted to accuse your siblings, cousins or friends of being part of a plot to murder everyone, look no further.",
            "social deduction",
            1589418827099,
            8,
        ),
        (
            "Scythe; you're gonna need a bigger table!",
            "Jamey Stegmaier",
            "mallionaire",
            "Spend 30 minutes just setting up all of the boards before spending the next hour stealing chickens from your opponents.",
            "social deduction",
            1611311824839,
            100,
        ),
        (
            "Settlers of Catan: Don't Settle For Less",
            "Klaus Teuber",
            "mallionaire",
            "You have stumbled across an uncharted island rich in natural resources, but you are not alone.",
            "social deduction",
            788918827000,
            16,
        ),
    ];

    review::Entity::insert_many(reviews.map(
        |(title, designer, owner, body, slug, created_at, votes)| review::ActiveModel {
            title: sea_orm::ActiveValue::Set(title.to_string()),
            designer: sea_orm::ActiveValue::Set(designer.to_string()),
            owner: sea_orm::ActiveValue::Set(owner.to_string()),
            review_img_url: sea_orm::ActiveValue::Set(PLACEHOLDER_IMG.to_string()),
            review_body: sea_orm::ActiveValue::Set(body.to_string()),
            category: sea_orm::ActiveValue::Set(slug.to_string()),
            created_at: sea_orm::ActiveValue::Set(ts_millis(created_at)),
            votes: sea_orm::ActiveValue::Set(votes),
            ..Default::default()
        },
    ))
    .exec(db)
    .await?;

    // (body, votes, author, review_id, created_at millis)
    let comments: [(&str, i32, &str, i32, i64); 6] = [
        ("I loved this game too!", 16, "bainesface", 2, 1511354613389),
        (
            "My dog loved this game too!",
            13,
            "mallionaire",
            3,
            1610964545410,
        ),
        (
            "I didn't know dogs could play games",
            10,
            "philippaclaire9",
            3,
            1610964588110,
        ),
        ("EPIC board game!", 16, "bainesface", 2, 1511354163389),
        (
            "Now this is a story all about how, board games turned my life upside down",
            13,
            "mallionaire",
            2,
            1610965445410,
        ),
        (
            "Not sure about dogs, but my cat likes to get involved with board games, the boxes are their particular favourite",
            10,
            "philippaclaire9",
            3,
            1616874588110,
        ),
    ];

    comment::Entity::insert_many(comments.map(
        |(body, votes, author, review_id, created_at)| comment::ActiveModel {
            body: sea_orm::ActiveValue::Set(body.to_string()),
            votes: sea_orm::ActiveValue::Set(votes),
            author: sea_orm::ActiveValue::Set(author.to_string()),
            review_id: sea_orm::ActiveValue::Set(review_id),
            created_at: sea_orm::ActiveValue::Set(ts_millis(created_at)),
            ..Default::default()
        },
    ))
    .exec(db)
    .await?;

    Ok(())
}
