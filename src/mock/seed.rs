//! Seed data for the mock backend.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::models::{
    House, Order, OrderHouse, OrderStatus, Owner, Review, Reviewer, Role, User,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "123456";

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

pub fn houses() -> Vec<House> {
    vec![
        House {
            id: "1".to_string(),
            title: "Seaview Twin Room".to_string(),
            address: "Haitang Bay, Sanya".to_string(),
            price: 458.0,
            image_url: "https://picsum.photos/800/600?random=1".to_string(),
            rating: 4.8,
            tags: vec![
                "seaview".to_string(),
                "twin".to_string(),
                "resort".to_string(),
            ],
            description: "Unobstructed 180-degree ocean view, three minutes on foot \
                          to the beach. Premium bedding, hot water around the clock, \
                          free WiFi."
                .to_string(),
            facilities: Some(vec![
                "Free WiFi".to_string(),
                "24h hot water".to_string(),
                "Air conditioning".to_string(),
                "TV".to_string(),
                "Fridge".to_string(),
                "Washing machine".to_string(),
            ]),
            owner: Some(Owner {
                name: "Mr. Zhang".to_string(),
                phone: "13800138000".to_string(),
                avatar: format!("{AVATAR_BASE}host1"),
            }),
        },
        House {
            id: "2".to_string(),
            title: "Modern Queen Room".to_string(),
            address: "Chaoyang District, Beijing".to_string(),
            price: 328.0,
            image_url: "https://picsum.photos/800/600?random=2".to_string(),
            rating: 4.6,
            tags: vec![
                "queen".to_string(),
                "downtown".to_string(),
                "metro".to_string(),
            ],
            description: "Next to the Sanlitun shopping district with easy transit. \
                          Minimalist interior with smart appliances throughout."
                .to_string(),
            facilities: Some(vec![
                "Smart lock".to_string(),
                "Floor heating".to_string(),
                "Air conditioning".to_string(),
                "Projector".to_string(),
                "Coffee machine".to_string(),
            ]),
            owner: Some(Owner {
                name: "Ms. Li".to_string(),
                phone: "13900139000".to_string(),
                avatar: format!("{AVATAR_BASE}host2"),
            }),
        },
        House {
            id: "3".to_string(),
            title: "Historic Courtyard Home".to_string(),
            address: "Dongcheng District, Beijing".to_string(),
            price: 688.0,
            image_url: "https://picsum.photos/800/600?random=3".to_string(),
            rating: 4.9,
            tags: vec![
                "courtyard".to_string(),
                "heritage".to_string(),
                "hutong".to_string(),
            ],
            description: "A restored century-old residence keeping its traditional \
                          architecture while adding present-day comforts."
                .to_string(),
            facilities: Some(vec![
                "Courtyard".to_string(),
                "Tea house".to_string(),
                "Air conditioning".to_string(),
                "Heating".to_string(),
                "Dedicated butler".to_string(),
            ]),
            owner: Some(Owner {
                name: "Mr. Wang".to_string(),
                phone: "13700137000".to_string(),
                avatar: format!("{AVATAR_BASE}host3"),
            }),
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            username: "Administrator".to_string(),
            email: ADMIN_EMAIL.to_string(),
            avatar: Some(format!("{AVATAR_BASE}admin")),
            phone: None,
            role: Role::Admin,
        },
        User {
            id: "2".to_string(),
            username: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            avatar: Some(format!("{AVATAR_BASE}demo")),
            phone: None,
            role: Role::User,
        },
    ]
}

pub fn reviews() -> Vec<Review> {
    vec![
        Review {
            id: "1".to_string(),
            user_id: "2".to_string(),
            house_id: "1".to_string(),
            rating: 5,
            content: "Spotless room in a great location, and the host could not \
                      have been more welcoming!"
                .to_string(),
            images: Some(vec![
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=400".to_string(),
                "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=400".to_string(),
            ]),
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap(),
            user: Reviewer {
                username: "Zhang San".to_string(),
                avatar: format!("{AVATAR_BASE}1"),
            },
        },
        Review {
            id: "2".to_string(),
            user_id: "2".to_string(),
            house_id: "1".to_string(),
            rating: 4,
            content: "Nice stay overall, a little pricey though.".to_string(),
            images: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 14, 10, 30, 0).unwrap(),
            user: Reviewer {
                username: "Li Si".to_string(),
                avatar: format!("{AVATAR_BASE}2"),
            },
        },
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: "1".to_string(),
            house_id: "1".to_string(),
            user_id: "2".to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 3, 22).unwrap(),
            guests: 2,
            total_price: 916.0,
            status: OrderStatus::Confirmed,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap(),
            house: Some(OrderHouse {
                title: "Seaview Twin Room".to_string(),
                image_url: "https://picsum.photos/800/600?random=1".to_string(),
                address: "Haitang Bay, Sanya".to_string(),
            }),
        },
        Order {
            id: "2".to_string(),
            house_id: "2".to_string(),
            user_id: "2".to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 4, 3).unwrap(),
            guests: 1,
            total_price: 656.0,
            status: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 3, 16, 10, 30, 0).unwrap(),
            house: Some(OrderHouse {
                title: "Modern Queen Room".to_string(),
                image_url: "https://picsum.photos/800/600?random=2".to_string(),
                address: "Chaoyang District, Beijing".to_string(),
            }),
        },
    ]
}
