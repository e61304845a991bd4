#![allow(dead_code)]

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::NaiveDate;
use medislink_core::{
    AdPayload, AdminApi, DashboardData, Donation, DonationPayload, DonationStatus, Id,
    ImageAttachment, Loan, LoanRequest, LoanStatus, News, NewsPayload, Tool, ToolPayload,
    UserApi, UserProfile,
};

/// In-memory backend that records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub data: RefCell<DashboardData>,
    pub profile: Option<UserProfile>,
    pub calls: RefCell<Vec<String>>,
    pub sent_loans: RefCell<Vec<LoanRequest>>,
    pub sent_donations: RefCell<Vec<DonationPayload>>,
    pub fail_lists: bool,
    pub fail_mutations: bool,
}

impl FakeApi {
    pub fn seeded() -> Self {
        Self {
            data: RefCell::new(DashboardData {
                tools: vec![tool(1, "Kursi Roda", 2), tool(2, "Tongkat", 0)],
                loans: vec![loan(10, LoanStatus::Pending), loan(11, LoanStatus::Active)],
                news: vec![news(20)],
                ads: vec![],
                donations: vec![donation(30, DonationStatus::Pending)],
            }),
            profile: Some(admin_profile()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls that change state on the backend.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("list_") && !call.starts_with("get_"))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn list<T: Clone>(
        &self,
        name: &str,
        pick: impl Fn(&DashboardData) -> &Vec<T>,
    ) -> Result<Vec<T>, String> {
        self.record(name);
        if self.fail_lists {
            return Err(format!("{name}: 500 Internal Server Error"));
        }
        Ok(pick(&self.data.borrow()).clone())
    }

    fn mutate(&self, call: String) -> Result<(), String> {
        self.record(call.clone());
        if self.fail_mutations {
            return Err(format!("{call}: 500 Internal Server Error"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl UserApi for FakeApi {
    type Error = String;

    async fn get_tool(&self, id: Id) -> Result<Tool, String> {
        self.record(format!("get_tool {id}"));
        self.data
            .borrow()
            .tools
            .iter()
            .find(|tool| tool.id == id)
            .cloned()
            .ok_or_else(|| "404 Not Found".to_string())
    }

    async fn get_news_item(&self, id: Id) -> Result<News, String> {
        self.record(format!("get_news {id}"));
        self.data
            .borrow()
            .news
            .iter()
            .find(|news| news.id == id)
            .cloned()
            .ok_or_else(|| "404 Not Found".to_string())
    }

    async fn current_profile(&self) -> Result<UserProfile, String> {
        self.record("get_profile");
        self.profile.clone().ok_or_else(|| "401 Unauthorized".to_string())
    }

    async fn create_donation(&self, payload: &DonationPayload) -> Result<(), String> {
        self.mutate("create_donation".to_string())?;
        self.sent_donations.borrow_mut().push(payload.clone());
        Ok(())
    }

    async fn create_loan(&self, request: &LoanRequest) -> Result<(), String> {
        self.mutate("create_loan".to_string())?;
        self.sent_loans.borrow_mut().push(request.clone());
        Ok(())
    }
}

#[async_trait(?Send)]
impl AdminApi for FakeApi {
    async fn list_tools(&self) -> Result<Vec<Tool>, String> {
        self.list("list_tools", |data| &data.tools)
    }

    async fn list_loans(&self) -> Result<Vec<Loan>, String> {
        self.list("list_loans", |data| &data.loans)
    }

    async fn list_news(&self) -> Result<Vec<News>, String> {
        self.list("list_news", |data| &data.news)
    }

    async fn list_ads(&self) -> Result<Vec<medislink_core::Ad>, String> {
        self.list("list_ads", |data| &data.ads)
    }

    async fn list_donations(&self) -> Result<Vec<Donation>, String> {
        self.list("list_donations", |data| &data.donations)
    }

    async fn create_tool(&self, payload: &ToolPayload) -> Result<(), String> {
        self.mutate(format!("create_tool {}", payload.name))
    }

    async fn delete_tool(&self, id: Id) -> Result<(), String> {
        self.mutate(format!("delete_tool {id}"))?;
        self.data.borrow_mut().remove_tool(id);
        Ok(())
    }

    async fn update_loan_status(&self, id: Id, status: LoanStatus) -> Result<(), String> {
        self.mutate(format!("update_loan_status {id} {status}"))?;
        if let Some(loan) = self.data.borrow_mut().loans.iter_mut().find(|loan| loan.id == id) {
            loan.status = status;
        }
        Ok(())
    }

    async fn create_news(&self, payload: &NewsPayload) -> Result<(), String> {
        self.mutate(format!("create_news {}", payload.title))?;
        let mut data = self.data.borrow_mut();
        let id = 100 + data.news.len() as Id;
        data.news.push(News {
            id,
            title: payload.title.clone(),
            content: payload.content.clone(),
            image_url: None,
            created_at: None,
        });
        Ok(())
    }

    async fn create_ad(&self, payload: &AdPayload) -> Result<(), String> {
        self.mutate(format!("create_ad {}", payload.title))
    }

    async fn delete_ad(&self, id: Id) -> Result<(), String> {
        self.mutate(format!("delete_ad {id}"))
    }

    async fn receive_donation(&self, id: Id) -> Result<(), String> {
        self.mutate(format!("receive_donation {id}"))
    }

    async fn approve_donation(&self, id: Id, condition: &str) -> Result<(), String> {
        self.mutate(format!("approve_donation {id} {condition}"))
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub fn photo(size: usize) -> ImageAttachment {
    ImageAttachment::new("kursi.jpg", Some("image/jpeg"), vec![0xFF; size])
}

pub fn tool(id: Id, name: &str, stock: u32) -> Tool {
    Tool {
        id,
        name: name.to_string(),
        category: "Alat Bantu Jalan".to_string(),
        kind: "Manual".to_string(),
        size: "Dewasa".to_string(),
        description: String::new(),
        dimensions: String::new(),
        weight_cap: String::new(),
        condition: "baik".to_string(),
        stock,
        image_url: None,
    }
}

pub fn loan(id: Id, status: LoanStatus) -> Loan {
    Loan {
        id,
        tool_id: 1,
        tool_name: Some("Kursi Roda".to_string()),
        borrower_name: Some("Siti".to_string()),
        quantity: 1,
        loan_date: None,
        return_due: None,
        medical_condition: "Pasca operasi".to_string(),
        notes: String::new(),
        status,
    }
}

pub fn news(id: Id) -> News {
    News {
        id,
        title: "Donasi kursi roda".to_string(),
        content: "Sepuluh kursi roda baru.".to_string(),
        image_url: None,
        created_at: None,
    }
}

pub fn donation(id: Id, status: DonationStatus) -> Donation {
    Donation {
        id,
        tool_name: "Walker".to_string(),
        category: "Alat Bantu Jalan".to_string(),
        quantity: 1,
        description: "Masih layak".to_string(),
        pickup_address: "Jl. Merdeka 1".to_string(),
        pickup_date: None,
        image_url: None,
        status,
    }
}

pub fn admin_profile() -> UserProfile {
    UserProfile {
        id: 1,
        name: "Admin Medis".to_string(),
        role: "admin".to_string(),
        nik: Some("3201000000000001".to_string()),
        foto_ktp: Some("ktp.jpg".to_string()),
    }
}
