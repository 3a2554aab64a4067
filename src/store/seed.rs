//! 초기 데이터와 고정 카테고리 목록

use crate::bidding::model::{
    Auction, AuctionInfo, BidRecord, Category, MemberSince, SellerInfo, User,
};
use chrono::{Datelike, Local};
use std::collections::BTreeMap;

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "arte",
        name: "Arte",
        image: "https://i.imgur.com/7KqyV52.jpeg",
    },
    Category {
        id: "colecionaveis",
        name: "Colecionáveis",
        image: "https://i.imgur.com/gA3CfA6.jpeg",
    },
    Category {
        id: "eletronicos",
        name: "Eletrônicos",
        image: "https://i.imgur.com/8bXZEQJ.png",
    },
    Category {
        id: "joias",
        name: "Joias",
        image: "https://i.imgur.com/O6a6358.jpeg",
    },
    Category {
        id: "roupas",
        name: "Roupas",
        image: "https://i.imgur.com/sY21v5t.jpeg",
    },
    Category {
        id: "decoracao",
        name: "Decoração",
        image: "https://i.imgur.com/qWbVp5E.jpeg",
    },
];

pub fn initial_users() -> Vec<User> {
    vec![User {
        id: 1,
        name: "Gabriel Dantão".to_string(),
        email: "gabriel@email.com".to_string(),
        password: "123".to_string(),
        cpf: "123.456.789-00".to_string(),
        avatar: "https://i.imgur.com/kA78mGe.jpeg".to_string(),
        member_since: Local::now().year(),
    }]
}

pub fn initial_auctions() -> Vec<Auction> {
    let details = [
        ("Artista", "Morgana Zagury"),
        ("Título", "Flores do Campo"),
        ("Técnica", "Óleo sobre tela"),
        ("Dimensões", "60 x 80 cm"),
        ("Ano", "2023"),
        ("Condição", "Excelente"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect::<BTreeMap<_, _>>();

    vec![Auction {
        id: 1,
        title: "Pintura a Óleo 'Flores do Campo' por Morgana Zagury".to_string(),
        description: "Lote único de arte moderna, perfeito para colecionadores exigentes."
            .to_string(),
        category: "arte".to_string(),
        images: vec![
            "https://i.imgur.com/7KqyV52.jpeg".to_string(),
            "https://i.imgur.com/gA3CfA6.jpeg".to_string(),
            "https://i.imgur.com/O6a6358.jpeg".to_string(),
            "https://i.imgur.com/sY21v5t.jpeg".to_string(),
        ],
        details,
        auction_info: AuctionInfo {
            current_bid: 1200.0,
            increment: 50.0,
            start_bid: 1000.0,
        },
        end_date: "2025-09-20T23:59:00".to_string(),
        bid_history: vec![
            BidRecord {
                user: "Carlos Mendes".to_string(),
                amount: 1200.0,
                date: "20/07/2024 14:28".to_string(),
            },
            BidRecord {
                user: "Sofia Almeida".to_string(),
                amount: 1150.0,
                date: "20/07/2024 14:25".to_string(),
            },
        ],
        seller_info: SellerInfo {
            id: 1,
            name: "Gabriel Dantão".to_string(),
            avatar: "https://i.imgur.com/kA78mGe.jpeg".to_string(),
            member_since: MemberSince::Label("Vendedor desde 2024".to_string()),
        },
    }]
}

pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.id == id)
}
