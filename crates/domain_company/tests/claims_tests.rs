//! Tests for claim processing on travel and single-vehicle contracts

use core_kernel::{Amount, ContractNumber};
use domain_billing::PaymentFrequency;
use domain_company::{CompanyError, ErrorKind, InsuranceCompany};
use domain_party::NationalId;
use test_utils::{IdFixtures, TemporalFixtures, VehicleFixtures};

fn number(label: &str) -> ContractNumber {
    IdFixtures::contract_number(label)
}

fn natural(id: &str) -> NationalId {
    NationalId::new(id).unwrap()
}

// ============================================================================
// Travel Claims
// ============================================================================

mod travel_claims {
    use super::*;

    fn company_with_travellers(travellers: &[NationalId]) -> InsuranceCompany {
        let mut company = InsuranceCompany::new(TemporalFixtures::opening());
        company
            .insure_persons(
                number("TRV-1"),
                travellers[0].clone(),
                Amount::new(travellers.len() as i64),
                PaymentFrequency::Monthly,
                travellers.to_vec(),
            )
            .unwrap();
        company
    }

    #[test]
    fn test_claim_splits_coverage_equally_and_deactivates() {
        let travellers = vec![
            IdFixtures::natural_person(),
            IdFixtures::second_natural_person(),
            IdFixtures::third_natural_person(),
        ];
        let mut company = company_with_travellers(&travellers);
        // three insured parties: coverage 30

        company
            .process_travel_claim(&number("TRV-1"), &travellers)
            .unwrap();

        for traveller in &travellers {
            assert_eq!(
                company.party(traveller).unwrap().cumulative_payout(),
                Amount::new(10)
            );
        }
        assert!(!company.contract(&number("TRV-1")).unwrap().is_active());
    }

    #[test]
    fn test_claim_split_drops_the_remainder() {
        let travellers: Vec<NationalId> = [
            "8004175146",
            "8054176383",
            "8351068242",
            "9051070006",
            "6001010004",
            "7551060000",
            "8351060003",
        ]
        .into_iter()
        .map(natural)
        .collect();
        let mut company = company_with_travellers(&travellers);
        // seven insured parties: coverage 70; 70 / 3 pays 23 each

        let affected = &travellers[0..3];
        company
            .process_travel_claim(&number("TRV-1"), affected)
            .unwrap();

        for party in affected {
            assert_eq!(
                company.party(party).unwrap().cumulative_payout(),
                Amount::new(23)
            );
        }
        for bystander in &travellers[3..] {
            assert_eq!(
                company.party(bystander).unwrap().cumulative_payout(),
                Amount::ZERO
            );
        }
    }

    #[test]
    fn test_duplicate_affected_parties_are_paid_once() {
        let travellers = vec![
            IdFixtures::natural_person(),
            IdFixtures::second_natural_person(),
            IdFixtures::third_natural_person(),
        ];
        let mut company = company_with_travellers(&travellers);

        let affected = vec![
            travellers[0].clone(),
            travellers[0].clone(),
            travellers[1].clone(),
        ];
        company
            .process_travel_claim(&number("TRV-1"), &affected)
            .unwrap();

        // two distinct recipients: 30 / 2 = 15 each
        assert_eq!(
            company.party(&travellers[0]).unwrap().cumulative_payout(),
            Amount::new(15)
        );
        assert_eq!(
            company.party(&travellers[1]).unwrap().cumulative_payout(),
            Amount::new(15)
        );
    }

    #[test]
    fn test_claim_validations() {
        let travellers = vec![
            IdFixtures::natural_person(),
            IdFixtures::second_natural_person(),
        ];
        let mut company = company_with_travellers(&travellers);

        let err = company
            .process_travel_claim(&number("TRV-1"), &[])
            .unwrap_err();
        assert!(matches!(err, CompanyError::NoAffectedParties));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let outsider = IdFixtures::third_natural_person();
        let err = company
            .process_travel_claim(&number("TRV-1"), &[outsider])
            .unwrap_err();
        assert!(matches!(err, CompanyError::PartyNotInsured(_)));

        let err = company
            .process_travel_claim(&number("TRV-404"), &travellers)
            .unwrap_err();
        assert!(matches!(err, CompanyError::ContractNotFound(_)));

        // a second claim hits the deactivated contract
        company
            .process_travel_claim(&number("TRV-1"), &travellers)
            .unwrap();
        let err = company
            .process_travel_claim(&number("TRV-1"), &travellers)
            .unwrap_err();
        assert!(matches!(err, CompanyError::ContractInactive(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidContractState);
    }

    #[test]
    fn test_claim_requires_a_travel_contract() {
        let mut company = InsuranceCompany::new(TemporalFixtures::opening());
        company
            .insure_vehicle(
                number("C-1"),
                None,
                IdFixtures::legal_entity(),
                Amount::new(100),
                PaymentFrequency::Monthly,
                VehicleFixtures::standard(),
            )
            .unwrap();

        let err = company
            .process_travel_claim(&number("C-1"), &[IdFixtures::natural_person()])
            .unwrap_err();
        assert!(matches!(err, CompanyError::NotATravelContract(_)));
    }
}

// ============================================================================
// Vehicle Claims
// ============================================================================

mod vehicle_claims {
    use super::*;

    fn company_with_vehicle_contract(beneficiary: Option<NationalId>) -> InsuranceCompany {
        let mut company = InsuranceCompany::new(TemporalFixtures::opening());
        company
            .insure_vehicle(
                number("C-1"),
                beneficiary,
                IdFixtures::legal_entity(),
                Amount::new(100),
                PaymentFrequency::Monthly,
                VehicleFixtures::standard(), // value 10 000, coverage 5 000
            )
            .unwrap();
        company
    }

    #[test]
    fn test_write_off_pays_beneficiary_and_deactivates() {
        let beneficiary = IdFixtures::natural_person();
        let mut company = company_with_vehicle_contract(Some(beneficiary.clone()));

        // damages at 70% of the vehicle value write the contract off
        company
            .process_vehicle_claim(&number("C-1"), Amount::new(7_000))
            .unwrap();

        assert_eq!(
            company.party(&beneficiary).unwrap().cumulative_payout(),
            Amount::new(5_000)
        );
        assert!(!company.contract(&number("C-1")).unwrap().is_active());
        // the holder received nothing
        assert_eq!(
            company
                .party(&IdFixtures::legal_entity())
                .unwrap()
                .cumulative_payout(),
            Amount::ZERO
        );
    }

    #[test]
    fn test_sub_threshold_claim_keeps_the_contract_active() {
        let beneficiary = IdFixtures::natural_person();
        let mut company = company_with_vehicle_contract(Some(beneficiary.clone()));

        company
            .process_vehicle_claim(&number("C-1"), Amount::new(6_999))
            .unwrap();

        // the full coverage is still paid, not the expected damages
        assert_eq!(
            company.party(&beneficiary).unwrap().cumulative_payout(),
            Amount::new(5_000)
        );
        assert!(company.contract(&number("C-1")).unwrap().is_active());
    }

    #[test]
    fn test_claim_falls_back_to_the_policy_holder() {
        let mut company = company_with_vehicle_contract(None);

        company
            .process_vehicle_claim(&number("C-1"), Amount::new(7_000))
            .unwrap();

        assert_eq!(
            company
                .party(&IdFixtures::legal_entity())
                .unwrap()
                .cumulative_payout(),
            Amount::new(5_000)
        );
    }

    #[test]
    fn test_claim_validations() {
        let mut company = company_with_vehicle_contract(None);

        let err = company
            .process_vehicle_claim(&number("C-1"), Amount::ZERO)
            .unwrap_err();
        assert!(matches!(err, CompanyError::NonPositiveDamages));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = company
            .process_vehicle_claim(&number("C-404"), Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, CompanyError::ContractNotFound(_)));

        company.deactivate(&number("C-1")).unwrap();
        let err = company
            .process_vehicle_claim(&number("C-1"), Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, CompanyError::ContractInactive(_)));
    }

    #[test]
    fn test_claim_requires_a_single_vehicle_contract() {
        let mut company = InsuranceCompany::new(TemporalFixtures::opening());
        company
            .create_master_vehicle_contract(number("M-1"), None, IdFixtures::legal_entity())
            .unwrap();

        let err = company
            .process_vehicle_claim(&number("M-1"), Amount::new(100))
            .unwrap_err();
        assert!(matches!(err, CompanyError::NotASingleVehicleContract(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
